//! Deep path extraction out of materialized seed values.
//!
//! A [`SeedPath`] addresses a nested leaf inside a JSON value, either as an
//! explicit list of segments or as a dot-delimited string. [`extract`] walks
//! the value one segment at a time and reports the full walked path when a
//! segment is missing.

use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::{SeedError, SeedResult};

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;

/// A segmented address into a JSON value.
///
/// Object nodes are entered by key, array nodes by decimal index.
///
/// # Examples
///
/// ```rust
/// use seeds_core::SeedPath;
///
/// let dotted = SeedPath::from("user.addresses.0.city");
/// let segmented = SeedPath::from(vec!["user", "addresses", "0", "city"]);
/// assert_eq!(dotted, segmented);
/// assert!(SeedPath::from("").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SeedPath {
    segments: Vec<String>,
}

impl SeedPath {
    /// Creates a path from explicit segments. Segments may contain dots.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a dot-delimited path. An empty string is the empty path.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::default();
        }
        Self::new(dotted.split('.'))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for SeedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for SeedPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl From<String> for SeedPath {
    fn from(dotted: String) -> Self {
        Self::parse(&dotted)
    }
}

impl From<Vec<String>> for SeedPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl From<Vec<&str>> for SeedPath {
    fn from(segments: Vec<&str>) -> Self {
        Self::new(segments)
    }
}

impl From<&[&str]> for SeedPath {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for SeedPath {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments)
    }
}

/// Reads the value at `path` inside `value`.
///
/// Each segment must be directly owned by the current node: a key of an
/// object, or a canonical decimal index of an array. The empty path returns
/// `value` itself.
///
/// # Errors
///
/// Returns `SeedError::NotFound` naming every segment walked up to and
/// including the first one that could not be entered.
pub fn extract<'a>(value: &'a Value, path: &SeedPath) -> SeedResult<&'a Value> {
    let mut current = value;
    let mut walked: Vec<String> = Vec::with_capacity(path.segments.len());

    for segment in &path.segments {
        walked.push(segment.clone());
        current = child(current, segment).ok_or_else(|| {
            debug!(path = %path, walked = %walked.join("."), "Path segment not found");
            SeedError::property_value(&walked)
        })?;
    }

    Ok(current)
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => {
            let index: usize = segment.parse().ok()?;
            // "01" or "+1" are not own properties of an array
            if index.to_string() != segment {
                return None;
            }
            items.get(index)
        }
        _ => None,
    }
}
