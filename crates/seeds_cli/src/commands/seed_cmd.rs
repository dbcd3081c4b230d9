//! Seed file commands.
//!
//! `create` builds a seed set from a seed file and creates every seed.
//! `run` does the same and then removes every seed again, unless asked to
//! keep them. Both print a JSON report of the materialized values.

use std::path::PathBuf;

use clap::Args;
use seeds_core::{SeedNode, SeedSetHandle, SeedsClient};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::Error;

#[cfg(test)]
#[path = "seed_cmd_tests.rs"]
mod tests;

/// Command-line arguments shared by the seed file commands.
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Path to a JSON seed file
    #[arg(long, short)]
    pub file: PathBuf,

    /// Name to register the seed set under (generated when omitted)
    #[arg(long)]
    pub name: Option<String>,
}

/// Command-line arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub seeds: SeedArgs,

    /// Leave the created seeds in place
    #[arg(long)]
    pub keep: bool,
}

/// What a seed file command did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedReport {
    /// Name the set was registered under
    pub name: String,

    /// Materialized value of every seed, in order
    pub values: Vec<Value>,

    /// Whether the seeds were removed again
    pub removed: bool,
}

/// Creates every seed of `definitions` as one registered set.
#[instrument(skip(client, definitions), fields(count = definitions.len()))]
pub async fn create_seeds(
    client: &SeedsClient,
    definitions: Vec<SeedNode>,
    name: Option<&str>,
) -> Result<SeedReport, Error> {
    let set = client.seeds(definitions, name);
    let values = create(&set).await?;

    Ok(SeedReport {
        name: set.name().to_string(),
        values,
        removed: false,
    })
}

/// Creates every seed, then removes them all unless `keep` is set.
///
/// A failed create stops the run; seeds created before it are left in place.
#[instrument(skip(client, definitions), fields(count = definitions.len()))]
pub async fn run_seeds(
    client: &SeedsClient,
    definitions: Vec<SeedNode>,
    name: Option<&str>,
    keep: bool,
) -> Result<SeedReport, Error> {
    let set = client.seeds(definitions, name);
    let values = create(&set).await?;

    if !keep {
        let set_name = set.name().to_string();
        set.lock()
            .await
            .remove_all_with_progress(|p| {
                info!(set = %set_name, index = p.index, "Seed removed");
            })
            .await?;
    }

    Ok(SeedReport {
        name: set.name().to_string(),
        values,
        removed: !keep,
    })
}

async fn create(set: &SeedSetHandle) -> Result<Vec<Value>, Error> {
    let set_name = set.name().to_string();
    let values = set
        .lock()
        .await
        .create_all_with_progress(|p| {
            info!(set = %set_name, index = p.index, "Seed created");
        })
        .await?;
    Ok(values)
}
