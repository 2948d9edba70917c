//! Remote catalog endpoint and timeout configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::FetchError;

/// Base URL of the public mock catalog.
pub const DEFAULT_BASE_URL: &str = "https://64b0c83bc60b8f941af5fdab.mockapi.io";

/// Path of the product collection under the base URL.
pub const PRODUCT_RESOURCE: &str = "/product";

/// Connection settings for the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, without the resource path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Connection establishment timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    default_timeout_ms() / 4
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl ApiConfig {
    /// Config pointing at another base URL with default timeouts.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Total request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Connect timeout, never longer than the total timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms.min(self.timeout_ms))
    }

    /// Check that the base URL is an absolute http(s) URL and the timeouts are usable.
    pub fn validate(&self) -> Result<(), FetchError> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                url.scheme(),
                self.base_url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(FetchError::InvalidUrl(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.connect_timeout(), Duration::from_millis(2_500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_connect_timeout_is_capped() {
        let config = ApiConfig {
            timeout_ms: 100,
            connect_timeout_ms: 5_000,
            ..ApiConfig::default()
        };
        assert_eq!(config.connect_timeout(), Duration::from_millis(100));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        assert!(ApiConfig::with_base_url("not a url").validate().is_err());
        assert!(ApiConfig::with_base_url("ftp://example.com").validate().is_err());
        assert!(ApiConfig::with_base_url("http://localhost:3000").validate().is_ok());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: ApiConfig = serde_json::from_str(r#"{"timeout_ms": 500}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_ms, 500);
    }
}
