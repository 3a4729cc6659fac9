//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): inbound requests by method, status
//! - `gateway_request_duration_seconds` (histogram): inbound latency
//! - `gateway_downstream_calls_total` (counter): `GetData` calls by outcome
//! - `gateway_downstream_duration_seconds` (histogram): `GetData` latency
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one inbound GraphQL request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let status = status.to_string();
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "gateway_request_duration_seconds",
        "method" => method.to_string(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one downstream `GetData` call.
pub fn record_downstream_call(ok: bool, start: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    counter!("gateway_downstream_calls_total", "outcome" => outcome).increment(1);
    histogram!("gateway_downstream_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
