//! Response mapping.
//!
//! # Responsibilities
//! - Successful forwards: upstream body verbatim with upstream status
//! - Forwarding errors: `{error, details}` envelopes
//! - Last-resort handler for panics and unreadable bodies
//!
//! Every response produced here is JSON.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::forwarder::{ProxyError, ProxyReply};

/// `error` field of forwarding failures.
pub const PROXY_ERROR: &str = "proxy error";

/// `error` field of the global fallback.
pub const INTERNAL_ERROR: &str = "internal proxy server error";

impl IntoResponse for ProxyReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ProxyError::MissingToken => json!({ "error": "token not provided" }),
            ProxyError::Upstream { details, .. } => json!({
                "error": PROXY_ERROR,
                "details": details,
            }),
            ProxyError::Transport(message) => json!({
                "error": PROXY_ERROR,
                "details": message,
            }),
            ProxyError::InvalidBody(message) => {
                tracing::error!(error = %message, "Unreadable request body");
                internal_error_body(&message)
            }
        };
        (status, Json(body)).into_response()
    }
}

fn internal_error_body(message: &str) -> Value {
    json!({ "error": INTERNAL_ERROR, "message": message })
}

/// Response for a panic caught by `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(error = %message, "Handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(internal_error_body(&message))).into_response()
}
