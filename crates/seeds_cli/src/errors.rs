use std::io;

use seeds_core::SeedError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the seeds CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or parsing configuration.
    ///
    /// This error is returned when there are issues with the configuration file,
    /// such as missing required fields, invalid values, or file access problems.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The seed file could not be turned into seed definitions.
    ///
    /// Returned for files that are not a JSON array, or that contain a
    /// malformed `$ref` object.
    #[error("Seed file error: {0}")]
    SeedFile(String),

    /// The seeds API endpoint could not be set up or reached.
    #[error("Seeds API error: {0}")]
    Endpoint(#[from] seeds_endpoint::Error),

    /// A seed operation failed.
    #[error("Seed operation failed: {0}")]
    Seeds(#[from] SeedError),

    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse or render JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
