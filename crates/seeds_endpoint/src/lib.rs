//! Crate for talking to a remote seeds API.
//!
//! A seeds API is a small HTTP surface exposed by an application under test
//! that creates and removes test fixtures on request. This crate provides the
//! [`SeedTransport`] seam used by seed sets, the [`SeedPayload`] wire shape,
//! and [`HttpSeedEndpoint`], the reqwest-backed implementation.

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

pub mod config;
pub use config::EndpointConfig;

pub mod errors;
pub use errors::Error;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Path of the connectivity probe, relative to the base URL.
pub const TOUCH_PATH: &str = "touch";

/// Pattern the touch response body must match to be accepted as a seeds API.
const VERSION_BANNER_PATTERN: &str = r"seeds@[0-9].[0-9x].[0-9x]";

/// Body sent with every seed create or remove request.
///
/// `data` and `config` come from the seed definition, `value` is the value
/// the seed materialized on its last successful create (or an empty map).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPayload {
    /// Seed data, `null` when the definition has none
    pub data: Value,

    /// Materialized value of the seed, empty map when not yet created
    pub value: Value,

    /// Seed configuration, empty map when the definition has none
    pub config: Value,
}

impl Default for SeedPayload {
    fn default() -> Self {
        Self {
            data: Value::Null,
            value: Value::Object(Map::new()),
            config: Value::Object(Map::new()),
        }
    }
}

/// Performs seed requests against a seeds API.
///
/// Implementations must propagate remote failures as errors rather than
/// recovering locally; seed sets rely on that for their fail-fast behavior.
#[async_trait]
pub trait SeedTransport: Send + Sync {
    /// Issues a single seed request.
    ///
    /// # Arguments
    ///
    /// * `path` - `"<seed type>/<action>"`, e.g. `"user/create"`
    /// * `payload` - The request body
    ///
    /// # Returns
    ///
    /// The JSON value returned by the seeds API.
    async fn request(&self, path: &str, payload: &SeedPayload) -> Result<Value, Error>;
}

/// A seeds API reached over HTTP.
///
/// The endpoint must establish connectivity (see [`has_connectivity`]) before
/// it accepts seed requests. It is meant to be shared between every seed set
/// of a test run, typically behind an `Arc`.
///
/// [`has_connectivity`]: HttpSeedEndpoint::has_connectivity
#[derive(Debug)]
pub struct HttpSeedEndpoint {
    base_url: Url,
    client: reqwest::Client,
    banner: Regex,
    connected: AtomicBool,
    connecting: Mutex<()>,
}

impl HttpSeedEndpoint {
    /// Creates a new endpoint from configuration without checking connectivity.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingBaseUrl` if the base URL is empty,
    /// `Error::InvalidBaseUrl` if it cannot be parsed, or `Error::Http` if the
    /// HTTP client cannot be built.
    pub fn new(config: &EndpointConfig) -> Result<Self, Error> {
        let raw = config.base_url.trim();
        if raw.is_empty() {
            return Err(Error::MissingBaseUrl);
        }

        // Url::join replaces the last segment unless the base ends with a slash.
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{}/", raw)
        };
        let base_url =
            Url::parse(&normalized).map_err(|e| Error::InvalidBaseUrl(format!("{raw}: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let banner = Regex::new(VERSION_BANNER_PATTERN)
            .map_err(|e| Error::Configuration(format!("Invalid version banner pattern: {e}")))?;

        Ok(Self {
            base_url,
            client,
            banner,
            connected: AtomicBool::new(false),
            connecting: Mutex::new(()),
        })
    }

    /// Creates a new endpoint and immediately validates connectivity.
    ///
    /// # Errors
    ///
    /// Returns any error from [`HttpSeedEndpoint::new`] or
    /// [`HttpSeedEndpoint::has_connectivity`].
    pub async fn connect(config: &EndpointConfig) -> Result<Self, Error> {
        let endpoint = Self::new(config)?;
        endpoint.has_connectivity().await?;
        Ok(endpoint)
    }

    /// The normalized base URL, always ending with a slash.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether a previous connectivity check succeeded.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Validates connectivity with the seeds API.
    ///
    /// Sends `GET <base>/touch` and accepts the API when the response status is
    /// 200 and the body carries a `seeds@<major>.<minor>.<patch>` banner. The
    /// result is remembered: once connected, later calls answer without a
    /// request. Concurrent callers share a single in-flight check.
    ///
    /// # Errors
    ///
    /// - `Error::EndpointNotFound` if the touch path answers 404
    /// - `Error::UnexpectedStatus` for any other non-200 status
    /// - `Error::NotSeedsApi` if the body lacks the version banner
    /// - `Error::Http` if the request itself fails
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn has_connectivity(&self) -> Result<bool, Error> {
        let _guard = self.connecting.lock().await;
        if self.is_connected() {
            debug!("Seeds API connectivity already established");
            return Ok(true);
        }

        let result = self.touch().await;
        match &result {
            Ok(_) => {
                self.connected.store(true, Ordering::SeqCst);
                info!("Connected to seeds API");
            }
            Err(e) => {
                self.connected.store(false, Ordering::SeqCst);
                error!(error = %e, "Failed to connect to seeds API");
            }
        }
        result
    }

    async fn touch(&self) -> Result<bool, Error> {
        let url = self.url_for(TOUCH_PATH)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::EndpointNotFound {
                path: self.display_path(TOUCH_PATH),
            });
        }
        if status != reqwest::StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                path: self.display_path(TOUCH_PATH),
                status: status.as_u16(),
                body,
            });
        }
        if !self.banner.is_match(&body) {
            return Err(Error::NotSeedsApi {
                path: self.display_path(TOUCH_PATH),
            });
        }

        Ok(true)
    }

    fn url_for(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::InvalidBaseUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    /// Path as seen by the server, used in error messages.
    fn display_path(&self, path: &str) -> String {
        format!("{}{}", self.base_url.path(), path.trim_start_matches('/'))
    }
}

#[async_trait]
impl SeedTransport for HttpSeedEndpoint {
    /// Posts a seed payload to `<base>/<path>` and returns the JSON response.
    ///
    /// # Errors
    ///
    /// - `Error::NotConnected` if connectivity was never established
    /// - `Error::EndpointNotFound` if the path answers 404
    /// - `Error::UnexpectedStatus` for any other non-success status
    /// - `Error::Deserialization` if the body is not JSON
    #[instrument(skip(self, payload), fields(path = %path))]
    async fn request(&self, path: &str, payload: &SeedPayload) -> Result<Value, Error> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }

        let url = self.url_for(path)?;
        debug!(url = %url, "Sending seed request");

        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            warn!(status = status.as_u16(), "Seed request path not found");
            return Err(Error::EndpointNotFound {
                path: self.display_path(path),
            });
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "Seed request failed");
            return Err(Error::UnexpectedStatus {
                path: self.display_path(path),
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}
