//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): forwarded requests by operation, status
//! - `proxy_request_duration_seconds` (histogram): upstream latency by operation

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::StatusCode;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with an HTTP listener on `addr`.
///
/// Must be called from within the Tokio runtime, at most once per process.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .inspect_err(|e| {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        })?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one forwarded request.
pub fn record_request(operation: &'static str, status: StatusCode, start: Instant) {
    metrics::counter!(
        "proxy_requests_total",
        "operation" => operation,
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    metrics::histogram!("proxy_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn second_install_is_an_error() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        init_metrics(addr).unwrap();
        record_request("send_text", StatusCode::OK, Instant::now());

        assert!(init_metrics(addr).is_err());
    }
}
