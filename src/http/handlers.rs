//! Route handlers.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Json;
use serde_json::{json, Value};

use crate::forwarder::{
    bearer_token, decode_message, Forwarder, HealthReport, OutboundMessage, ProxyError, ProxyReply,
};
use crate::http::server::AppState;

/// `GET /health`
pub async fn health() -> Json<HealthReport> {
    Json(Forwarder::health())
}

/// `POST` on one of the send routes, selected by `M`.
pub async fn send<M: OutboundMessage>(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<ProxyReply, ProxyError> {
    let body = body.map_err(|e| ProxyError::InvalidBody(e.body_text()))?;
    let message: M = decode_message(&body)?;

    let token = bearer_token(&headers);
    if token.is_none() {
        tracing::warn!(operation = M::KIND.operation(), "Rejected request without bearer token");
    }

    state.forwarder.forward(token.as_deref(), &message).await
}

/// Anything not routed.
pub async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not found", "path": uri.path() })),
    )
}

/// A known path called with the wrong method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "error": "method not allowed",
            "method": method.as_str(),
            "path": uri.path(),
        })),
    )
}
