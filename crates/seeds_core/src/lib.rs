//! # Seeds Core
//!
//! Ordered provisioning and teardown of test fixtures ("seeds") against a
//! remote seeds API, for end-to-end test suites.
//!
//! ## Overview
//!
//! A seed set is an ordered list of seed definitions. Creating the set:
//! 1. Walks the seeds in index order, one request at a time
//! 2. Resolves any producers inside a seed's definition right before it is
//!    created, so later seeds can read what earlier seeds returned
//! 3. Posts `{ data, value, config }` to `<type>/create`
//! 4. Stores the returned value in the seed's slot
//!
//! The first failure stops the whole pass. Nothing is rolled back.
//!
//! ## Main Types
//!
//! - [`SeedNode`] - Definition tree, with [`SeedNode::Producer`] for deferred values
//! - [`SeedSet`] - The lifecycle engine
//! - [`SeedSetHandle`] - Shared handle used by the registry and test hooks
//! - [`SeedsClient`] - Builds and registers sets over one transport
//!
//! ## Examples
//!
//! ```no_run
//! use seeds_core::{SeedNode, SeedsClient};
//! use seeds_endpoint::EndpointConfig;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SeedsClient::connect(&EndpointConfig::new("http://localhost:3000/seeds")).await?;
//!
//! let blog = client.seeds(
//!     vec![
//!         SeedNode::from(json!({ "type": "user", "data": { "name": "alice" } })),
//!         SeedNode::object([
//!             ("type", SeedNode::from("post")),
//!             ("data", SeedNode::object([("author", SeedNode::reference(0, "id"))])),
//!         ]),
//!     ],
//!     Some("blog"),
//! );
//!
//! let title = blog
//!     .with(|values, _definitions| async move { values[1]["title"].clone() })
//!     .await?;
//! # let _ = title;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod errors;
pub mod flow;
pub mod node;
pub mod path;
pub mod registry;
pub mod resolver;
pub mod seed;
pub mod seed_set;

pub use client::SeedsClient;
pub use errors::{SeedError, SeedResult};
pub use flow::{Hook, HookQueue, LifecycleHooks, Teardown};
pub use node::{Producer, ProducerContext, SeedNode};
pub use path::{extract, SeedPath};
pub use registry::{generate_set_name, SeedRegistry};
pub use resolver::resolve;
pub use seed::{Seed, SeedAction, SeedState};
pub use seed_set::{SeedProgress, SeedSet, SeedSetHandle};
