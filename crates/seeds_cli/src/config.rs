//! Configuration management for the seeds CLI.
//!
//! The configuration is stored in TOML format and can be loaded from a
//! specified file path or from the default location in the current directory.
//! Endpoint settings are resolved with this precedence: `--base-url` flag,
//! then the configuration file, then the `SEEDS_BASE_URL` environment.

use std::{
    fs,
    path::{Path, PathBuf},
};

use seeds_endpoint::EndpointConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "seeds.toml";

/// Base URL written by `seeds init`
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/seeds";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the seeds CLI application.
///
/// # Example TOML Configuration
///
/// ```toml
/// [endpoint]
/// base_url = "http://localhost:3000/seeds"
/// timeout_seconds = 10
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Seeds API connection settings
    #[serde(default)]
    pub endpoint: EndpointSettings,
}

/// The `[endpoint]` table. Every field is optional so a file may set only
/// the timeout and leave the URL to the environment.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl AppConfig {
    /// A configuration pointing at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            endpoint: EndpointSettings {
                base_url: Some(base_url.into()),
                timeout_seconds: None,
            },
        }
    }

    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or
    /// contains invalid TOML.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use seeds_cli::config::AppConfig;
    ///
    /// match AppConfig::load(Path::new("./seeds.toml")) {
    ///     Ok(config) => println!("Seeds API at {:?}", config.endpoint.base_url),
    ///     Err(e) => eprintln!("Failed to load config: {}", e),
    /// }
    /// ```
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Saves the configuration to a TOML file, creating parent directories
    /// and overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails or the file cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Builds the endpoint configuration.
    ///
    /// `base_url_override` wins over the file. Without either, the base URL
    /// (and timeout, unless the file sets one) come from the environment.
    ///
    /// # Errors
    ///
    /// Returns `Error::Endpoint` if the environment has to be used and is
    /// incomplete.
    pub fn endpoint_config(&self, base_url_override: Option<&str>) -> Result<EndpointConfig, Error> {
        let base_url = base_url_override
            .map(str::to_string)
            .or_else(|| self.endpoint.base_url.clone());

        let mut config = match base_url {
            Some(url) => EndpointConfig::new(url),
            None => {
                debug!("No base URL configured, reading the environment");
                EndpointConfig::from_env()?
            }
        };
        if let Some(timeout) = self.endpoint.timeout_seconds {
            config.timeout_seconds = timeout;
        }

        Ok(config)
    }
}

/// Resolves the path to the configuration file.
///
/// Uses `config_path` when given, otherwise `seeds.toml` in the current
/// directory.
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}

/// Loads the configuration file if there is one and resolves the endpoint
/// configuration from it.
///
/// A missing file is not an error; an explicitly named but missing file is.
///
/// # Errors
///
/// Returns `Error::Config` for unreadable or invalid files, or an
/// `Error::Endpoint` when falling back to an incomplete environment.
pub fn resolve_endpoint_config(
    config_path: Option<&str>,
    base_url_override: Option<&str>,
) -> Result<EndpointConfig, Error> {
    let path = get_config_path(config_path);
    let app_config = if path.exists() || config_path.is_some() {
        AppConfig::load(&path)?
    } else {
        debug!(path = ?path, "No configuration file, using defaults");
        AppConfig::default()
    };

    app_config.endpoint_config(base_url_override)
}
