// src/http.rs
// Shared HTTP client for downstream REST calls and failure classification

use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

/// Default timeout for catalog, order and search calls
pub const DOWNSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Create the shared downstream client.
///
/// One client is built at startup and cloned into every downstream wrapper,
/// so all of them share a connection pool.
pub fn create_shared_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .pool_max_idle_per_host(10)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Why a single downstream call failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownstreamFailure {
    /// The server answered with a non-success status
    Status(StatusCode),
    /// The request did not complete within the timeout
    Timeout,
    /// Anything else: connect errors, undecodable bodies, ...
    Other(String),
}

impl From<reqwest::Error> for DownstreamFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DownstreamFailure::Timeout
        } else if let Some(status) = err.status() {
            DownstreamFailure::Status(status)
        } else {
            DownstreamFailure::Other(err.to_string())
        }
    }
}

/// Error payload handed back to the model in place of a tool result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
    pub message: String,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
