//! Prometheus metrics for request tracking.
//!
//! This module provides metrics for:
//! - HTTP request count and latency per endpoint
//! - Rejected requests by error kind
//! - Size of generated text

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Rejected requests counter metric name.
pub const METRIC_REQUEST_ERRORS: &str = "request_errors_total";
/// Generated text size metric name.
pub const METRIC_GENERATED_BYTES: &str = "generated_text_bytes";

/// Install the global Prometheus recorder.
///
/// Fails if another recorder is already installed in this process.
pub fn install_recorder() -> Result<PrometheusHandle, metrics_exporter_prometheus::BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_HTTP_REQUESTS,
        "Total number of HTTP requests by endpoint and status"
    );
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(
        METRIC_REQUEST_ERRORS,
        "Total number of rejected requests by error kind"
    );
    describe_histogram!(
        METRIC_GENERATED_BYTES,
        "Size of text returned by /generate in bytes"
    );

    debug!("Metrics initialized");
}

/// Record HTTP request latency and count.
pub fn record_http_request(start: Instant, endpoint: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint.to_string()).record(latency_ms);
    counter!(
        METRIC_HTTP_REQUESTS,
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Increment rejected requests counter.
pub fn inc_request_errors(kind: &'static str) {
    counter!(METRIC_REQUEST_ERRORS, "kind" => kind).increment(1);
}

/// Record the size of a generated text.
pub fn record_generated_bytes(len: usize) {
    histogram!(METRIC_GENERATED_BYTES).record(len as f64);
}
