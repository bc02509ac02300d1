//! Configuration types.

use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// Default backend origin.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is joined beneath. Always ends in `/`.
    pub base_url: Url,
    /// Per-request timeout. `None` waits for the backend indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// - `SMART_ASSIST_BASE_URL`: backend origin.
    /// - `SMART_ASSIST_REQUEST_TIMEOUT_SECS`: request timeout, `0` disables it.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("SMART_ASSIST_BASE_URL") {
            config.base_url = parse_base_url(raw.trim())?;
        }

        if let Some(raw) = lookup("SMART_ASSIST_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SMART_ASSIST_REQUEST_TIMEOUT_SECS".to_string(),
                message: format!("expected a whole number of seconds, got {raw:?}"),
            })?;
            config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Builder: set the base URL from a string.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Builder: set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// Parse and normalize a base URL so endpoint paths join beneath it.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        key: "SMART_ASSIST_BASE_URL".to_string(),
        message: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            key: "SMART_ASSIST_BASE_URL".to_string(),
            message: format!("unsupported scheme {:?}", url.scheme()),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
