use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result type for seed set operations.
pub type SeedResult<T> = Result<T, SeedError>;

/// Errors that can occur while creating, removing or reading seeds.
///
/// Transport failures are wrapped unchanged so callers can still match on the
/// endpoint's own variants (for example a missing seed handler).
///
/// # Examples
///
/// ```rust,ignore
/// use seeds_core::SeedError;
///
/// match set.parse(0, "user.id") {
///     Ok(id) => println!("user id: {}", id),
///     Err(SeedError::NotFound(what)) => eprintln!("missing {}", what),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum SeedError {
    /// A seed index, a materialized value, or a property path was not found.
    ///
    /// The message names what was looked up, e.g. `seed of index "3"` or
    /// `property value "user.address.city"`.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operation is not valid in the current state of the set or seed.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The transport failed; the original error is kept as the source.
    #[error("Transport failure: {0}")]
    Transport(#[from] seeds_endpoint::Error),
}

impl SeedError {
    pub(crate) fn seed_index(index: usize) -> Self {
        SeedError::NotFound(format!("seed of index \"{}\"", index))
    }

    pub(crate) fn property_value(walked: &[String]) -> Self {
        SeedError::NotFound(format!("property value \"{}\"", walked.join(".")))
    }
}
