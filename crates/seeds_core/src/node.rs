//! Seed definition trees.
//!
//! A seed definition is a JSON-like tree that may carry deferred
//! computations ("producers") at any depth. Producers are resolved against
//! the owning set's materialized values right before the seed is created.

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::path::{self, SeedPath};
use crate::seed::Seed;
use crate::{SeedError, SeedResult};

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;

type ProducerFn = dyn Fn(&ProducerContext<'_>) -> SeedResult<SeedNode> + Send + Sync;

/// A deferred computation embedded in a seed definition.
///
/// Cloning a producer is cheap; clones share the same function.
#[derive(Clone)]
pub struct Producer(Arc<ProducerFn>);

impl Producer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ProducerContext<'_>) -> SeedResult<SeedNode> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Runs the producer against the given context.
    ///
    /// # Errors
    ///
    /// Returns whatever error the producer itself raises.
    pub fn produce(&self, ctx: &ProducerContext<'_>) -> SeedResult<SeedNode> {
        (self.0)(ctx)
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Producer(..)")
    }
}

impl PartialEq for Producer {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// What a producer sees when it runs.
#[derive(Debug, Clone, Copy)]
pub struct ProducerContext<'a> {
    /// Index of the seed being resolved
    pub index: usize,

    /// Materialized values of every seed in the set, `None` where not created
    pub values: &'a [Option<Value>],

    /// Every seed in the set, in order
    pub seeds: &'a [Seed],
}

impl<'a> ProducerContext<'a> {
    /// Materialized value of the seed at `index`, if it has been created.
    pub fn value(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Reads a deep value out of the materialized value of seed `index`.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::NotFound` if the seed has no materialized value or
    /// the path does not exist inside it.
    pub fn parse(&self, index: usize, path: &SeedPath) -> SeedResult<&'a Value> {
        let value = self.value(index).ok_or_else(|| SeedError::seed_index(index))?;
        path::extract(value, path)
    }
}

/// A node of a seed definition tree.
///
/// Every variant except [`SeedNode::Producer`] mirrors a JSON value.
///
/// # Examples
///
/// ```rust
/// use seeds_core::SeedNode;
/// use serde_json::json;
///
/// // The second seed posts the id the first seed was created with.
/// let user = SeedNode::from(json!({ "type": "user", "data": { "name": "alice" } }));
/// let post = SeedNode::object([
///     ("type", SeedNode::from("post")),
///     ("data", SeedNode::object([
///         ("author", SeedNode::reference(0, "id")),
///     ])),
/// ]);
/// # let _ = (user, post);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SeedNode {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<SeedNode>),
    Object(BTreeMap<String, SeedNode>),
    Producer(Producer),
}

impl SeedNode {
    /// Wraps a closure as a producer node.
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn(&ProducerContext<'_>) -> SeedResult<SeedNode> + Send + Sync + 'static,
    {
        SeedNode::Producer(Producer::new(f))
    }

    /// A producer that reads `path` out of the materialized value of seed
    /// `index`. Only seeds created earlier in the pass can be referenced.
    pub fn reference(index: usize, path: impl Into<SeedPath>) -> Self {
        let path = path.into();
        SeedNode::producer(move |ctx| ctx.parse(index, &path).map(|v| SeedNode::from(v.clone())))
    }

    /// Builds an object node from key/node pairs.
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, SeedNode)>,
        K: Into<String>,
    {
        SeedNode::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Child node under `key` when this node is an object.
    pub fn get(&self, key: &str) -> Option<&SeedNode> {
        match self {
            SeedNode::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SeedNode::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether any producer remains anywhere in the tree.
    pub fn has_producers(&self) -> bool {
        match self {
            SeedNode::Producer(_) => true,
            SeedNode::Array(items) => items.iter().any(SeedNode::has_producers),
            SeedNode::Object(map) => map.values().any(SeedNode::has_producers),
            _ => false,
        }
    }

    /// Converts the tree into a JSON value, dropping unresolved producers.
    ///
    /// A producer under an object key is left out, one inside an array or at
    /// the root becomes `null`.
    pub fn to_value_lossy(&self) -> Value {
        match self {
            SeedNode::Array(items) => {
                Value::Array(items.iter().map(SeedNode::to_value_lossy).collect())
            }
            SeedNode::Object(map) => Value::Object(
                map.iter()
                    .filter(|(_, node)| !matches!(node, SeedNode::Producer(_)))
                    .map(|(key, node)| (key.clone(), node.to_value_lossy()))
                    .collect(),
            ),
            SeedNode::Producer(_) => Value::Null,
            SeedNode::Null => Value::Null,
            SeedNode::Bool(b) => Value::Bool(*b),
            SeedNode::Number(n) => Value::Number(n.clone()),
            SeedNode::String(s) => Value::String(s.clone()),
        }
    }

    /// Converts a fully resolved tree into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::InvalidOperation` if a producer is still present.
    pub fn to_value(&self) -> SeedResult<Value> {
        Ok(match self {
            SeedNode::Null => Value::Null,
            SeedNode::Bool(b) => Value::Bool(*b),
            SeedNode::Number(n) => Value::Number(n.clone()),
            SeedNode::String(s) => Value::String(s.clone()),
            SeedNode::Array(items) => Value::Array(
                items
                    .iter()
                    .map(SeedNode::to_value)
                    .collect::<SeedResult<Vec<_>>>()?,
            ),
            SeedNode::Object(map) => {
                let mut out = Map::new();
                for (key, node) in map {
                    out.insert(key.clone(), node.to_value()?);
                }
                Value::Object(out)
            }
            SeedNode::Producer(_) => {
                return Err(SeedError::InvalidOperation(
                    "seed definition still contains an unresolved producer".to_string(),
                ))
            }
        })
    }
}

impl From<Value> for SeedNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SeedNode::Null,
            Value::Bool(b) => SeedNode::Bool(b),
            Value::Number(n) => SeedNode::Number(n),
            Value::String(s) => SeedNode::String(s),
            Value::Array(items) => SeedNode::Array(items.into_iter().map(SeedNode::from).collect()),
            Value::Object(map) => {
                SeedNode::Object(map.into_iter().map(|(k, v)| (k, SeedNode::from(v))).collect())
            }
        }
    }
}

impl From<&str> for SeedNode {
    fn from(s: &str) -> Self {
        SeedNode::String(s.to_string())
    }
}

impl From<String> for SeedNode {
    fn from(s: String) -> Self {
        SeedNode::String(s)
    }
}

impl From<bool> for SeedNode {
    fn from(b: bool) -> Self {
        SeedNode::Bool(b)
    }
}

impl From<i64> for SeedNode {
    fn from(n: i64) -> Self {
        SeedNode::Number(n.into())
    }
}

impl From<Producer> for SeedNode {
    fn from(p: Producer) -> Self {
        SeedNode::Producer(p)
    }
}

impl From<Vec<SeedNode>> for SeedNode {
    fn from(items: Vec<SeedNode>) -> Self {
        SeedNode::Array(items)
    }
}
