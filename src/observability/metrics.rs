//! Access log metrics.
//!
//! # Metrics
//! - `access_log_records_total` (counter): lines written, by format
//! - `access_log_errors_total` (counter): records dropped, by kind

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_emitted(format: &'static str) {
    counter!("access_log_records_total", "format" => format).increment(1);
}

pub fn record_failure(kind: &'static str) {
    counter!("access_log_errors_total", "kind" => kind).increment(1);
}
