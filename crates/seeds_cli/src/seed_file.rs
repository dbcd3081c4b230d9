//! Seed files.
//!
//! A seed file is a JSON array of seed definitions. Any object of the form
//!
//! ```json
//! { "$ref": { "seed": 0, "path": "user.id" } }
//! ```
//!
//! is replaced by a producer reading `path` out of the value seed `0` was
//! created with. `path` may be a dotted string or an array of segments and
//! defaults to the whole value. Only earlier seeds can be referenced.

use std::fs;
use std::path::Path;

use seeds_core::{SeedNode, SeedPath};
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::Error;

#[cfg(test)]
#[path = "seed_file_tests.rs"]
mod tests;

/// Key marking a reference object.
pub const REFERENCE_KEY: &str = "$ref";

/// Reads and converts the seed file at `path`.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read, `Error::Json` if it is not
/// JSON and `Error::SeedFile` if it is not a valid list of seeds.
pub fn load_seed_file(path: &Path) -> Result<Vec<SeedNode>, Error> {
    debug!("Loading seed file from {:?}", path);
    let content = fs::read_to_string(path)?;
    parse_seed_definitions(&content)
}

/// Converts the text of a seed file into seed definitions.
///
/// # Errors
///
/// See [`load_seed_file`].
pub fn parse_seed_definitions(content: &str) -> Result<Vec<SeedNode>, Error> {
    let Value::Array(items) = serde_json::from_str::<Value>(content)? else {
        return Err(Error::SeedFile(
            "expected a JSON array of seed definitions".to_string(),
        ));
    };

    let definitions = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(Error::SeedFile(format!(
                    "seed {} is not a JSON object",
                    index
                )));
            }
            convert(item, index)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = definitions.len(), "Parsed seed definitions");
    Ok(definitions)
}

/// Converts one value of seed `owner`, turning reference objects into
/// producers.
fn convert(value: Value, owner: usize) -> Result<SeedNode, Error> {
    match value {
        Value::Object(map) if map.contains_key(REFERENCE_KEY) => reference(map, owner),
        Value::Object(map) => Ok(SeedNode::Object(
            map.into_iter()
                .map(|(key, v)| convert(v, owner).map(|node| (key, node)))
                .collect::<Result<_, _>>()?,
        )),
        Value::Array(items) => Ok(SeedNode::Array(
            items
                .into_iter()
                .map(|v| convert(v, owner))
                .collect::<Result<_, _>>()?,
        )),
        other => Ok(SeedNode::from(other)),
    }
}

fn reference(mut map: Map<String, Value>, owner: usize) -> Result<SeedNode, Error> {
    if map.len() != 1 {
        return Err(Error::SeedFile(format!(
            "seed {}: a \"{}\" object must not have other keys",
            owner, REFERENCE_KEY
        )));
    }
    let Some(Value::Object(body)) = map.remove(REFERENCE_KEY) else {
        return Err(Error::SeedFile(format!(
            "seed {}: \"{}\" must be an object",
            owner, REFERENCE_KEY
        )));
    };

    let target = body
        .get("seed")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            Error::SeedFile(format!(
                "seed {}: \"{}.seed\" must be a non-negative integer",
                owner, REFERENCE_KEY
            ))
        })?;
    if target >= owner {
        return Err(Error::SeedFile(format!(
            "seed {} can only reference earlier seeds, not seed {}",
            owner, target
        )));
    }

    let path: SeedPath = match body.get("path") {
        None | Some(Value::Null) => SeedPath::default(),
        Some(Value::String(dotted)) => SeedPath::parse(dotted),
        Some(Value::Array(segments)) => segments
            .iter()
            .map(|s| match s {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(Error::SeedFile(format!(
                    "seed {}: \"{}.path\" segments must be strings or numbers",
                    owner, REFERENCE_KEY
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?
            .into(),
        Some(_) => {
            return Err(Error::SeedFile(format!(
                "seed {}: \"{}.path\" must be a string or an array",
                owner, REFERENCE_KEY
            )))
        }
    };

    Ok(SeedNode::reference(target, path))
}
