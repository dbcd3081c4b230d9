use seeds_endpoint::{EndpointConfig, HttpSeedEndpoint};
use tracing::{info, instrument};

use crate::errors::Error;

#[cfg(test)]
#[path = "check_cmd_tests.rs"]
mod tests;

/// Checks that a seeds API answers at the configured base URL.
///
/// Returns the normalized base URL on success.
#[instrument(skip(config), fields(base_url = %config.base_url))]
pub async fn check_connectivity(config: &EndpointConfig) -> Result<String, Error> {
    let endpoint = HttpSeedEndpoint::connect(config).await?;
    info!("Seeds API is reachable");
    Ok(endpoint.base_url().to_string())
}
