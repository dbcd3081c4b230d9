//! Error types for seeds endpoint operations.
//!
//! This module defines the errors that can occur while talking to a remote
//! seeds API: configuration problems, missing connectivity, and failed HTTP
//! exchanges. Seed set operations propagate these unchanged.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during seeds endpoint operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use seeds_endpoint::Error;
///
/// match endpoint.request("user/create", &payload).await {
///     Ok(value) => println!("Created: {}", value),
///     Err(Error::EndpointNotFound { path }) => eprintln!("No seed handler at {}", path),
///     Err(Error::NotConnected) => eprintln!("Call has_connectivity() first"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The endpoint was configured without a base URL.
    #[error("\"baseUrl\" must be defined for the Seeds API to be used.")]
    MissingBaseUrl,

    /// The configured base URL could not be parsed.
    #[error("Invalid seeds API base URL: {0}")]
    InvalidBaseUrl(String),

    /// A seed request was attempted before connectivity was established.
    ///
    /// Call `HttpSeedEndpoint::has_connectivity` (or build the endpoint with
    /// `HttpSeedEndpoint::connect`) before issuing seed requests.
    #[error("Seeds API must be initialized before usage.")]
    NotConnected,

    /// The seeds API answered with a 404 for the requested path.
    ///
    /// This usually means the remote application has no seed handler
    /// registered for the requested resource type and action.
    #[error("Seeds API path \"{path}\" could not be found")]
    EndpointNotFound {
        /// Request path relative to the base URL
        path: String,
    },

    /// The seeds API answered with a non-success status other than 404.
    #[error("Seeds API path \"{path}\" answered with status {status}: {body}")]
    UnexpectedStatus {
        /// Request path relative to the base URL
        path: String,
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The touch request succeeded but the body did not carry a seeds API
    /// version banner.
    #[error("Path \"{path}\" did not answer as a seeds API")]
    NotSeedsApi {
        /// Request path relative to the base URL
        path: String,
    },

    /// The HTTP exchange itself failed (connection refused, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be parsed as JSON.
    #[error("Failed to deserialize seeds API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Endpoint configuration could not be loaded.
    #[error("Endpoint configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Returns true when the error means the endpoint is not ready for use,
    /// as opposed to a failed remote call.
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Error::MissingBaseUrl | Error::NotConnected)
    }

    /// Returns true when the remote side reported the requested path as missing.
    pub fn is_endpoint_not_found(&self) -> bool {
        matches!(self, Error::EndpointNotFound { .. })
    }
}
