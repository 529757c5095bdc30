//! Blocking HTTP client for the safe-mode gate endpoint.

use std::time::Duration;
use thiserror::Error;

/// Why a gate status could not be fetched.
#[derive(Error, Debug)]
pub enum GateFetchError {
    #[error("Gate URL is not configured")]
    MissingUrl,

    #[error("Gate request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gate endpoint answered with status {0}")]
    Status(u16),

    #[error("Gate endpoint answered with a non-boolean body: {0:?}")]
    UnparsableBody(String),
}

/// Anything that can report the current gate state.
pub trait GateSource: Send + Sync {
    /// Fetch the current state. May block.
    fn fetch_status(&self) -> Result<bool, GateFetchError>;

    /// Where the state comes from, for logs.
    fn describe(&self) -> &str;
}

/// Parse a gate response body.
///
/// Accepts `true`/`false` and `1`/`0`, ignoring case and surrounding whitespace.
///
/// # Errors
/// Returns [`GateFetchError::UnparsableBody`] for anything else.
pub fn parse_gate_body(body: &str) -> Result<bool, GateFetchError> {
    match body.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(GateFetchError::UnparsableBody(body.to_string())),
    }
}

/// Gate source backed by a single HTTP GET.
///
/// The underlying `reqwest::blocking::Client` is built per fetch so that it is
/// created and dropped on the calling (blocking) thread; refreshes are rare.
#[derive(Debug, Clone)]
pub struct HttpGateClient {
    url: String,
    timeout: Duration,
}

impl HttpGateClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl GateSource for HttpGateClient {
    fn fetch_status(&self) -> Result<bool, GateFetchError> {
        if self.url.trim().is_empty() {
            return Err(GateFetchError::MissingUrl);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let response = client.get(self.url.as_str()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(GateFetchError::Status(status.as_u16()));
        }
        let body = response.text()?;
        parse_gate_body(&body)
    }

    fn describe(&self) -> &str {
        &self.url
    }
}
