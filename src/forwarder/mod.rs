//! Request forwarding to the Buho messaging API.
//!
//! # Data Flow
//! ```text
//! inbound POST (headers + JSON body)
//!     → bearer_token (Authorization header, 401 when absent)
//!     → decode_message (opaque JSON fields)
//!     → UpstreamClient::post_json (same path, relaxed TLS)
//!     → 2xx: upstream body verbatim with upstream status
//!     → non-2xx: {error, details} with upstream status
//!     → transport failure: {error, details} with 500
//! ```

pub mod error;
pub mod messages;

use std::time::Instant;

use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::observability::metrics;
use crate::upstream::UpstreamClient;

pub use error::ProxyError;
pub use messages::{MediaMessage, MessageKind, OutboundMessage, PdfMessage, TextMessage};

/// Successful forward: the status and body handed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: StatusCode,
    pub body: Value,
}

/// Liveness payload served on `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

/// Forwards messages to the single configured upstream.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: UpstreamClient,
}

impl Forwarder {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Forward one message. `token` is the bearer credential taken from the
    /// inbound request; without it nothing is sent.
    pub async fn forward<M: OutboundMessage>(
        &self,
        token: Option<&str>,
        message: &M,
    ) -> Result<ProxyReply, ProxyError> {
        let kind = M::KIND;
        let token = token.ok_or(ProxyError::MissingToken)?;
        let start = Instant::now();

        tracing::info!(
            operation = kind.operation(),
            recipient = %message.recipient().map(messages::display_value).unwrap_or_default(),
            summary = %message.summary(),
            "Forwarding message"
        );

        let response = match self.client.post_json(kind.path(), token, message).await {
            Ok(response) => response,
            Err(e) => {
                let message = e.detailed_message();
                tracing::error!(operation = kind.operation(), error = %message, "Upstream request failed");
                metrics::record_request(kind.operation(), StatusCode::INTERNAL_SERVER_ERROR, start);
                return Err(ProxyError::Transport(message));
            }
        };

        let status = response.status;
        metrics::record_request(kind.operation(), status, start);
        let body = response.body.into_value();

        if status.is_success() {
            tracing::info!(operation = kind.operation(), status = status.as_u16(), "Message forwarded");
            Ok(ProxyReply { status, body })
        } else {
            tracing::warn!(
                operation = kind.operation(),
                status = status.as_u16(),
                details = %body,
                "Upstream rejected message"
            );
            Err(ProxyError::Upstream { status, details: body })
        }
    }

    /// Static liveness report. Never touches the upstream.
    pub fn health() -> HealthReport {
        HealthReport {
            status: "OK",
            message: "Buho proxy server is running",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Bearer token from the `Authorization` header.
///
/// The first `"Bearer "` is stripped; anything else is passed through
/// opaquely. A missing header or an empty token yields `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.replacen("Bearer ", "", 1);
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Decode an inbound body.
///
/// Fields are only ever taken from a JSON object by name. An empty body or a
/// JSON array yields no fields (`{}`); any other JSON value is rejected.
pub fn decode_message<M: OutboundMessage>(body: &[u8]) -> Result<M, ProxyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(M::default());
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ProxyError::InvalidBody(e.to_string()))?;
    match value {
        Value::Object(fields) => serde_json::from_value(Value::Object(fields))
            .map_err(|e| ProxyError::InvalidBody(e.to_string())),
        Value::Array(_) => Ok(M::default()),
        other => Err(ProxyError::InvalidBody(format!(
            "expected a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
