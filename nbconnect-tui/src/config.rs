//! Environment-derived configuration.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Base URL used when `NBCONNECT_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8888";

/// Request timeout used when `NBCONNECT_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const BASE_URL_VAR: &str = "NBCONNECT_URL";
const TIMEOUT_VAR: &str = "NBCONNECT_TIMEOUT_SECS";

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Startup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the notebook server hosting the connect endpoint.
    pub base_url: String,
    /// Timeout for the connect request. A hung backend fails the attempt
    /// instead of hanging the placeholder forever.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::var(BASE_URL_VAR).ok(), env::var(TIMEOUT_VAR).ok())
    }

    fn from_vars(
        base_url: Option<String>,
        timeout_secs: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(base_url) = base_url.filter(|v| !v.is_empty()) {
            config.base_url = base_url;
        }
        if let Some(value) = timeout_secs.filter(|v| !v.is_empty()) {
            let secs: u64 = value.parse().map_err(|_| ConfigError::InvalidTimeout {
                var: TIMEOUT_VAR,
                value,
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
