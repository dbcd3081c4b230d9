//! A single seed: its definition and lifecycle state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::node::SeedNode;
use crate::{SeedError, SeedResult};
use seeds_endpoint::SeedPayload;

#[cfg(test)]
#[path = "seed_tests.rs"]
mod tests;

/// Lifecycle state of one seed in a set.
///
/// ```text
/// Uncreated -> Creating -> Created -> Removed
///                 |
///                 v
///               Failed
/// ```
///
/// A create may start again from `Failed`, `Created` or `Removed`. A create
/// whose future is dropped before the seeds API answers leaves the seed in
/// `Creating`; the next create starts over from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedState {
    Uncreated,
    Creating,
    Created,
    Removed,
    Failed,
}

/// The two actions a seeds API understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedAction {
    Create,
    Remove,
}

impl SeedAction {
    pub fn as_str(self) -> &'static str {
        match self {
            SeedAction::Create => "create",
            SeedAction::Remove => "remove",
        }
    }
}

impl fmt::Display for SeedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One seed of a set.
///
/// The materialized value lives in the owning set's value slots, so producers
/// of later seeds can read it.
#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    index: usize,
    definition: SeedNode,
    state: SeedState,
}

impl Seed {
    pub fn new(index: usize, definition: SeedNode) -> Self {
        Self {
            index,
            definition,
            state: SeedState::Uncreated,
        }
    }

    /// Position of the seed in its set.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn definition(&self) -> &SeedNode {
        &self.definition
    }

    pub fn state(&self) -> SeedState {
        self.state
    }

    pub(crate) fn set_definition(&mut self, definition: SeedNode) {
        self.definition = definition;
    }

    pub(crate) fn set_state(&mut self, state: SeedState) {
        self.state = state;
    }

    /// Remote resource kind named by the `type` field.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::InvalidOperation` when `type` is missing or is not
    /// a string.
    pub fn seed_type(&self) -> SeedResult<&str> {
        self.definition
            .get("type")
            .and_then(SeedNode::as_str)
            .ok_or_else(|| {
                SeedError::InvalidOperation(format!(
                    "seed of index \"{}\" has no \"type\" string",
                    self.index
                ))
            })
    }

    /// Request path for `action`, e.g. `user/create`.
    ///
    /// # Errors
    ///
    /// Same as [`Seed::seed_type`].
    pub fn request_path(&self, action: SeedAction) -> SeedResult<String> {
        Ok(format!("{}/{}", self.seed_type()?, action))
    }

    /// Builds the create request body from the definition and the current
    /// value.
    ///
    /// `data` falls back to `null`, `value` and `config` to an empty map,
    /// whenever they are missing or falsy (`null`, `false`, `0` or `""`).
    ///
    /// # Errors
    ///
    /// Returns `SeedError::InvalidOperation` if `data` or `config` still hold
    /// an unresolved producer.
    pub fn payload(&self, value: Option<&Value>) -> SeedResult<SeedPayload> {
        let data = self.definition.get("data").map(SeedNode::to_value).transpose()?;
        let config = self
            .definition
            .get("config")
            .map(SeedNode::to_value)
            .transpose()?;

        Ok(assemble(data, value, config))
    }

    /// Builds the remove request body.
    ///
    /// Same defaults as [`Seed::payload`], but producers that were never
    /// resolved are dropped instead of rejected, so a seed that was never
    /// created can still be sent to `remove`.
    pub fn remove_payload(&self, value: Option<&Value>) -> SeedPayload {
        let data = self.definition.get("data").map(SeedNode::to_value_lossy);
        let config = self.definition.get("config").map(SeedNode::to_value_lossy);

        assemble(data, value, config)
    }
}

fn assemble(data: Option<Value>, value: Option<&Value>, config: Option<Value>) -> SeedPayload {
    SeedPayload {
        data: data.filter(is_truthy).unwrap_or(Value::Null),
        value: value
            .filter(|v| is_truthy(v))
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())),
        config: config
            .filter(is_truthy)
            .unwrap_or_else(|| Value::Object(Map::new())),
    }
}

/// JSON truthiness: `null`, `false`, zero and the empty string are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
