//! Lazy resolution of producers inside seed definitions.

use std::collections::BTreeMap;

use crate::node::{ProducerContext, SeedNode};
use crate::SeedResult;

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

/// Returns a copy of `node` with every producer replaced by what it produces.
///
/// The walk is depth-first. A produced tree is walked again, so producers
/// that yield further producers are resolved until none remain.
///
/// # Errors
///
/// Returns the first error raised by a producer.
pub fn resolve(node: &SeedNode, ctx: &ProducerContext<'_>) -> SeedResult<SeedNode> {
    match node {
        SeedNode::Producer(producer) => {
            let produced = producer.produce(ctx)?;
            resolve(&produced, ctx)
        }
        SeedNode::Array(items) => items
            .iter()
            .map(|item| resolve(item, ctx))
            .collect::<SeedResult<Vec<_>>>()
            .map(SeedNode::Array),
        SeedNode::Object(map) => map
            .iter()
            .map(|(key, child)| -> SeedResult<(String, SeedNode)> {
                Ok((key.clone(), resolve(child, ctx)?))
            })
            .collect::<SeedResult<BTreeMap<_, _>>>()
            .map(SeedNode::Object),
        leaf => Ok(leaf.clone()),
    }
}
