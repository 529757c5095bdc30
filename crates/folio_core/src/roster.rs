//! Current editors-in-chief from the role directory.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Path, relative to the directory base URL, of the current chefred mandates.
pub const CHEFRED_ROLE_PATH: &str = "api/role/chefred/current";

/// Why the chefred list could not be fetched.
#[derive(Error, Debug)]
pub enum RosterFetchError {
    #[error("Role directory URL is not configured")]
    MissingUrl,

    #[error("Role directory request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Role directory answered with status {0}")]
    Status(u16),
}

/// Anything that can name the current editors-in-chief.
pub trait ChefredSource: Send + Sync {
    /// KTH ids of the current chefreds, in directory order. May block.
    fn current_chefreds(&self) -> Result<Vec<String>, RosterFetchError>;
}

#[derive(Debug, Deserialize)]
struct RoleResponse {
    #[serde(default)]
    mandates: Vec<Mandate>,
}

#[derive(Debug, Deserialize)]
struct Mandate {
    user: MandateUser,
}

#[derive(Debug, Deserialize)]
struct MandateUser {
    kthid: String,
}

/// Full URL of the chefred role listing under `base`.
pub fn chefred_url(base: &str) -> String {
    let base = base.trim();
    if base.ends_with('/') {
        format!("{base}{CHEFRED_ROLE_PATH}")
    } else {
        format!("{base}/{CHEFRED_ROLE_PATH}")
    }
}

/// Chefred source backed by the role directory's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpChefredClient {
    base_url: String,
    timeout: Duration,
}

impl HttpChefredClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

impl ChefredSource for HttpChefredClient {
    fn current_chefreds(&self) -> Result<Vec<String>, RosterFetchError> {
        if self.base_url.trim().is_empty() {
            return Err(RosterFetchError::MissingUrl);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let response = client.get(chefred_url(&self.base_url)).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RosterFetchError::Status(status.as_u16()));
        }
        let role: RoleResponse = response.json()?;
        Ok(role
            .mandates
            .into_iter()
            .map(|mandate| mandate.user.kthid)
            .collect())
    }
}

/// Current chefreds, or none when the directory cannot be reached.
pub fn chefreds_or_empty(source: &dyn ChefredSource) -> Vec<String> {
    match source.current_chefreds() {
        Ok(ids) => ids,
        Err(err) => {
            tracing::warn!("Could not fetch chefreds: {}", err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unreachable;

    impl ChefredSource for Unreachable {
        fn current_chefreds(&self) -> Result<Vec<String>, RosterFetchError> {
            Err(RosterFetchError::Status(502))
        }
    }

    #[test]
    fn url_joins_with_one_slash() {
        assert_eq!(
            chefred_url("https://dfunkt.example"),
            "https://dfunkt.example/api/role/chefred/current"
        );
        assert_eq!(
            chefred_url("https://dfunkt.example/ "),
            "https://dfunkt.example/api/role/chefred/current"
        );
    }

    #[test]
    fn mandates_yield_kth_ids_in_order() {
        let body = r#"{"role":{"title":"Chefred"},"mandates":[
            {"start":"2026-01-01","user":{"kthid":"annab","first_name":"Anna"}},
            {"user":{"kthid":"bertc"}}
        ]}"#;
        let role: RoleResponse = serde_json::from_str(body).expect("role json");
        let ids: Vec<String> = role.mandates.into_iter().map(|m| m.user.kthid).collect();
        assert_eq!(ids, vec!["annab", "bertc"]);

        let vacant: RoleResponse = serde_json::from_str("{}").expect("empty role");
        assert!(vacant.mandates.is_empty());
    }

    #[test]
    fn failures_give_no_chefreds() {
        assert!(chefreds_or_empty(&Unreachable).is_empty());
        let unconfigured = HttpChefredClient::new("", Duration::from_secs(1));
        assert!(matches!(
            unconfigured.current_chefreds(),
            Err(RosterFetchError::MissingUrl)
        ));
        assert!(chefreds_or_empty(&unconfigured).is_empty());
    }
}
