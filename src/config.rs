//! Configuration
//!
//! Read from the environment at startup.

use std::time::Duration;

use thiserror::Error;

pub const API_URL_VAR: &str = "RECIPESHARE_API_URL";
pub const HTTP_TIMEOUT_VAR: &str = "RECIPESHARE_HTTP_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("RECIPESHARE_API_URL must be an http:// or https:// URL, got '{0}'")]
    InvalidApiUrl(String),

    #[error("RECIPESHARE_HTTP_TIMEOUT_SECS must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the recipe API, without a trailing slash
    pub api_url: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = match get(API_URL_VAR) {
            Some(raw) => {
                let url = raw.trim().trim_end_matches('/').to_string();
                if !(url.starts_with("http://") || url.starts_with("https://"))
                    || reqwest::Url::parse(&url).is_err()
                {
                    return Err(ConfigError::InvalidApiUrl(raw));
                }
                url
            }
            None => DEFAULT_API_URL.to_string(),
        };

        let http_timeout = match get(HTTP_TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            http_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config =
            Config::from_lookup(lookup(&[(API_URL_VAR, " https://api.example.com/v1/ ")])).unwrap();
        assert_eq!(config.api_url, "https://api.example.com/v1");
    }

    #[test]
    fn test_blank_means_default() {
        let config = Config::from_lookup(lookup(&[(API_URL_VAR, "  ")])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_rejects_bad_url() {
        let err = Config::from_lookup(lookup(&[(API_URL_VAR, "ftp://x")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidApiUrl("ftp://x".to_string()));
    }

    #[test]
    fn test_timeout() {
        let config = Config::from_lookup(lookup(&[(HTTP_TIMEOUT_VAR, "5")])).unwrap();
        assert_eq!(config.http_timeout, Duration::from_secs(5));

        assert!(Config::from_lookup(lookup(&[(HTTP_TIMEOUT_VAR, "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[(HTTP_TIMEOUT_VAR, "soon")])).is_err());
    }
}
