//! Metrics collection and Prometheus export.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// Must be called once at startup before any metrics are recorded.
pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

/// Record the outcome of one webhook batch.
pub fn record_batch(status: &str) {
    let labels = [("status", status.to_string())];
    metrics::counter!("webhook_batches_total", &labels).increment(1);
}

/// Record the outcome of one dispatched event.
pub fn record_dispatch(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    metrics::counter!("webhook_events_total", &labels).increment(1);
}
