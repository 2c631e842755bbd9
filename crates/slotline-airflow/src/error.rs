//! Client error types.

use thiserror::Error;

/// Result type alias for API client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while fetching traces from the orchestrator.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("session cookie contains characters not allowed in a header")]
    SessionCookie,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Trace(#[from] slotline_trace::TraceError),
}
