//! Client configuration.
//!
//! Resolves the backend base URL and HTTP timeout from explicit values, the
//! environment, and built-in defaults (in that order).

use std::time::Duration;

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

pub const ENV_API_URL: &str = "STUDYBUDDY_API_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "STUDYBUDDY_HTTP_TIMEOUT_SECS";

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Settings needed to talk to the study buddy backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Normalized base URL without a trailing slash.
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Builds a config for an explicit base URL with the default timeout.
    pub fn new(api_base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url.as_ref())?,
            ..Self::default()
        })
    }

    /// Resolves configuration from an optional explicit URL and the process environment.
    pub fn from_env(explicit_url: Option<String>) -> Result<Self> {
        Self::resolve(
            explicit_url,
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_HTTP_TIMEOUT_SECS).ok(),
        )
    }

    /// Pure resolution step behind [`ClientConfig::from_env`].
    pub fn resolve(
        explicit_url: Option<String>,
        env_url: Option<String>,
        env_timeout_secs: Option<String>,
    ) -> Result<Self> {
        let url = normalize_text_option(explicit_url)
            .or_else(|| normalize_text_option(env_url))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout = match normalize_text_option(env_timeout_secs) {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    Error::Configuration(format!(
                        "{ENV_HTTP_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(Error::Configuration(format!(
                        "{ENV_HTTP_TIMEOUT_SECS} must be greater than zero"
                    )));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base_url: normalize_base_url(&url)?,
            request_timeout,
        })
    }

    /// Absolute URL for a backend path such as `/payment`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

/// Trims whitespace and trailing slashes and requires an http(s) scheme.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(Error::Configuration(
            "API base URL must not be empty".to_string(),
        ));
    }
    if !is_http_url(&base) {
        return Err(Error::Configuration(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn normalize_base_url_rejects_invalid_values() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("example.com").is_err());
    }

    #[test]
    fn normalize_base_url_trims_trailing_slash() {
        assert_eq!(
            normalize_base_url(" https://study.example.com/ ").unwrap(),
            "https://study.example.com"
        );
    }

    #[test]
    fn resolve_prefers_explicit_url_over_environment() {
        let config = ClientConfig::resolve(
            Some("https://explicit.example.com".to_string()),
            Some("https://env.example.com".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://explicit.example.com");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn resolve_falls_back_to_default_url() {
        let config = ClientConfig::resolve(Some("  ".to_string()), None, None).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:5000");
    }

    #[test]
    fn resolve_rejects_bad_timeout() {
        assert!(ClientConfig::resolve(None, None, Some("soon".to_string())).is_err());
        assert!(ClientConfig::resolve(None, None, Some("0".to_string())).is_err());
        let config = ClientConfig::resolve(None, None, Some("3".to_string())).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn url_for_joins_paths() {
        let config = ClientConfig::new("https://study.example.com/").unwrap();
        assert_eq!(config.url_for("/payment"), "https://study.example.com/payment");
    }
}
