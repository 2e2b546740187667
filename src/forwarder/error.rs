//! Errors surfaced by forwarding operations.
//!
//! Every variant maps to a JSON response in `http::response`; none escapes
//! the operation boundary as a fault.

use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// No bearer token on the inbound request. Upstream is never contacted.
    #[error("token not provided")]
    MissingToken,

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned {status}")]
    Upstream { status: StatusCode, details: Value },

    /// Connection, TLS or timeout failure talking to upstream.
    #[error("upstream transport failure: {0}")]
    Transport(String),

    /// The inbound body could not be read, is not JSON, or is a JSON scalar.
    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

impl ProxyError {
    /// Status code returned to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingToken => StatusCode::UNAUTHORIZED,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Transport(_) | ProxyError::InvalidBody(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
