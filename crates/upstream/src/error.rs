//! Upstream error types.

use thiserror::Error;

/// Outcome of a failed call to the directory.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The service could not be reached (DNS, refused connection, timeout).
    #[error("Upstream request failed: {0}")]
    Unavailable(String),

    /// The service answered 404 for the requested resource.
    #[error("Upstream reported {resource} not found")]
    NotFound { resource: String },

    /// The service answered with some other error status.
    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered 2xx but the body was not the expected JSON.
    #[error("Upstream returned an unreadable payload: {0}")]
    InvalidPayload(String),

    /// The HTTP client itself could not be built.
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(#[source] reqwest::Error),
}

/// Convenience type alias for upstream results.
pub type Result<T> = std::result::Result<T, UpstreamError>;
