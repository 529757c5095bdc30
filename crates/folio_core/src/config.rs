//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_GATE_TIMEOUT_SECS, DEFAULT_MAX_FORM_SIZE, DEFAULT_PORT,
};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for Folio.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    /// Endpoint answering `true`/`false` for the safe-mode gate.
    pub gate_url: String,
    pub gate_timeout_secs: u64,
    pub max_form_size: usize,
    /// Base URL of the role directory listing the current editors-in-chief.
    pub dfunkt_url: String,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    std::env::current_dir().ok()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring unparsable {}='{}'", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        let gate_url = env::var("GATE_URL")
            .map(|url| url.trim().to_string())
            .unwrap_or_default();
        if gate_url.is_empty() {
            tracing::warn!("GATE_URL is not set; safe mode will stay active");
        }

        let dfunkt_url = env::var("DFUNKT_URL")
            .map(|url| url.trim().to_string())
            .unwrap_or_default();
        if dfunkt_url.is_empty() {
            tracing::warn!("DFUNKT_URL is not set; the roster will list no chefreds");
        }

        Self {
            db_path: env::var("DB_PATH").map(expand_tilde).unwrap_or_else(|_| {
                let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
                let cache_dir = home.join(".cache").join("folio");
                cache_dir.join("db").to_string_lossy().to_string()
            }),
            port: env_parsed("PORT", DEFAULT_PORT),
            gate_url,
            gate_timeout_secs: env_parsed("GATE_TIMEOUT_SECS", DEFAULT_GATE_TIMEOUT_SECS),
            max_form_size: env_parsed("MAX_FORM_SIZE", DEFAULT_MAX_FORM_SIZE),
            dfunkt_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{expand_tilde, parse_env_flag};

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_accepts_falsy_values() {
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_rejects_unknown_values() {
        assert_eq!(parse_env_flag("maybe"), None);
        assert_eq!(parse_env_flag("enabled"), None);
    }

    #[test]
    fn expand_tilde_leaves_absolute_paths_alone() {
        assert_eq!(expand_tilde("/var/lib/folio".to_string()), "/var/lib/folio");
        assert!(!expand_tilde("~/folio".to_string()).starts_with('~'));
    }
}
