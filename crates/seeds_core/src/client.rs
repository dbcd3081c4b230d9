//! Entry point tying a transport and a registry together.

use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::node::SeedNode;
use crate::registry::{self, SeedRegistry};
use crate::seed_set::{SeedSet, SeedSetHandle};
use crate::SeedResult;
use seeds_endpoint::{EndpointConfig, HttpSeedEndpoint, SeedTransport};

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

/// Builds seed sets against one shared transport and keeps them registered
/// by name.
///
/// # Examples
///
/// ```rust,no_run
/// use seeds_core::{SeedNode, SeedsClient};
/// use seeds_endpoint::EndpointConfig;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SeedsClient::connect(&EndpointConfig::from_env()?).await?;
///
/// let users = client.seeds(
///     vec![SeedNode::from(json!({ "type": "user", "data": { "name": "alice" } }))],
///     Some("users"),
/// );
/// users.create_all().await?;
///
/// // Elsewhere in the suite
/// let same = client.get_seeds("users").expect("registered above");
/// let id = same.parse(0, "id").await?;
/// # let _ = id;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SeedsClient {
    transport: Arc<dyn SeedTransport>,
    registry: SeedRegistry,
}

impl SeedsClient {
    /// Creates a client over an existing transport with an empty registry.
    pub fn new(transport: Arc<dyn SeedTransport>) -> Self {
        Self {
            transport,
            registry: SeedRegistry::new(),
        }
    }

    /// Connects to the seeds API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Transport` if the endpoint is misconfigured or the
    /// connectivity check fails.
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub async fn connect(config: &EndpointConfig) -> SeedResult<Self> {
        let endpoint = HttpSeedEndpoint::connect(config).await?;
        Ok(Self::new(Arc::new(endpoint)))
    }

    /// Builds a seed set and registers it.
    ///
    /// When `name` is `None` a short unique name is generated. Nothing is
    /// created on the seeds API yet.
    pub fn seeds(&self, definitions: Vec<SeedNode>, name: Option<&str>) -> SeedSetHandle {
        let name = name.map_or_else(registry::generate_set_name, str::to_string);
        info!(set = %name, count = definitions.len(), "Building seed set");

        let handle = SeedSetHandle::new(SeedSet::new(
            name.clone(),
            definitions,
            self.transport.clone(),
        ));
        self.registry.register(name, handle.clone());
        handle
    }

    /// Registers `set` under `name`, replacing any earlier set of that name.
    pub fn register_seeds(&self, name: impl Into<String>, set: SeedSetHandle) {
        self.registry.register(name, set);
    }

    /// The set registered under `name`, if any.
    pub fn get_seeds(&self, name: &str) -> Option<SeedSetHandle> {
        self.registry.get(name)
    }

    pub fn registry(&self) -> &SeedRegistry {
        &self.registry
    }

    pub fn transport(&self) -> Arc<dyn SeedTransport> {
        self.transport.clone()
    }
}

impl fmt::Debug for SeedsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedsClient")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
