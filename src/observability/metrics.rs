//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by route class and status
//! - `edge_request_duration_seconds` (histogram): latency by route class
//! - `edge_asset_lookups_total` (counter): lookups by source (store, origin, missing)
//! - `edge_shell_fallbacks_total` (counter): times the built-in fallback page was served
//!
//! Without an installed recorder every call is a no-op, so handlers and tests
//! can record unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed request.
pub fn record_request(class: &'static str, status: u16, start: Instant) {
    ::metrics::counter!(
        "edge_requests_total",
        "class" => class,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("edge_request_duration_seconds", "class" => class)
        .record(start.elapsed().as_secs_f64());
}

/// Record where an asset lookup was satisfied.
pub fn record_asset_lookup(source: &'static str) {
    ::metrics::counter!("edge_asset_lookups_total", "source" => source).increment(1);
}

/// Record one use of the built-in fallback page.
pub fn record_shell_fallback() {
    ::metrics::counter!("edge_shell_fallbacks_total").increment(1);
}
