//! Endpoint configuration.

use serde::{Deserialize, Serialize};
use std::env;

use crate::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Environment variable holding the seeds API base URL.
pub const BASE_URL_ENV_VAR: &str = "SEEDS_BASE_URL";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV_VAR: &str = "SEEDS_TIMEOUT_SECONDS";

/// Settings for connecting to a seeds API.
///
/// # Example TOML Configuration
///
/// ```toml
/// base_url = "http://localhost:3000/seeds"
/// timeout_seconds = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the seeds API, e.g. `http://localhost:3000/seeds`
    pub base_url: String,

    /// HTTP request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    30
}

impl EndpointConfig {
    /// Creates a configuration for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: default_timeout(),
        }
    }

    /// Load endpoint configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `SEEDS_BASE_URL`: Base URL of the seeds API
    ///
    /// Optional environment variables:
    /// - `SEEDS_TIMEOUT_SECONDS`: Request timeout in seconds (numeric)
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the base URL is not set or the
    /// timeout is not a valid number.
    pub fn from_env() -> Result<Self, Error> {
        let base_url = env::var(BASE_URL_ENV_VAR).map_err(|_| {
            Error::Configuration(format!("{} environment variable not set", BASE_URL_ENV_VAR))
        })?;

        let timeout_seconds = match env::var(TIMEOUT_ENV_VAR) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Configuration(format!("{} must be a valid number", TIMEOUT_ENV_VAR))
            })?,
            Err(_) => default_timeout(),
        };

        Ok(Self {
            base_url,
            timeout_seconds,
        })
    }
}
