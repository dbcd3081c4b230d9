use std::path::PathBuf;

use tracing::{debug, error, info, instrument};

use crate::config::{get_config_path, AppConfig, DEFAULT_BASE_URL};
use crate::errors::Error;

#[cfg(test)]
#[path = "init_cmd_tests.rs"]
mod tests;

/// Writes a starter configuration file and returns its path.
///
/// Refuses to overwrite an existing file.
#[instrument]
pub fn init_config(path: Option<&str>, base_url: Option<&str>) -> Result<PathBuf, Error> {
    let config_path = get_config_path(path);
    debug!(message = "Initializing configuration", path = ?config_path);

    if config_path.exists() {
        let err = Error::Config(format!(
            "Configuration file already exists at {:?}",
            config_path
        ));
        error!(
            message = "Configuration file already exists",
            path = ?config_path,
            error = ?err
        );
        return Err(err);
    }

    AppConfig::with_base_url(base_url.unwrap_or(DEFAULT_BASE_URL)).save(&config_path)?;

    info!(message = "Configuration initialized", path = ?config_path);
    Ok(config_path)
}
