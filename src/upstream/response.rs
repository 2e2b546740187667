//! Upstream response decoding.

use axum::http::StatusCode;
use serde_json::{json, Value};

/// How much of a non-JSON body is echoed back to the caller.
pub const RAW_PREVIEW_CHARS: usize = 1000;

/// Body of an upstream response, decoded once.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    /// The body parsed as JSON.
    Json(Value),
    /// The body was not JSON; `raw` holds at most [`RAW_PREVIEW_CHARS`] characters.
    Raw { raw: String, parse_error: String },
}

impl UpstreamBody {
    /// Decode a response body, falling back to the raw-text envelope.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(value) => UpstreamBody::Json(value),
            Err(e) => UpstreamBody::Raw {
                raw: text.chars().take(RAW_PREVIEW_CHARS).collect(),
                parse_error: e.to_string(),
            },
        }
    }

    /// The JSON value handed back to the caller.
    pub fn into_value(self) -> Value {
        match self {
            UpstreamBody::Json(value) => value,
            UpstreamBody::Raw { raw, parse_error } => json!({
                "error": "response is not JSON",
                "raw": raw,
                "parseError": parse_error,
            }),
        }
    }
}

/// Status and decoded body of one upstream exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: UpstreamBody,
}
