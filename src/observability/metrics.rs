//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ingress_requests_total` (counter): requests by outcome
//!   (accepted, rejected, too_large, error)
//! - `ingress_rejected_total` (counter): allow-list rejections
//! - `ingress_publish_total` (counter): enqueue results (queued, error)
//! - `ingress_delivery_total` (counter): downstream delivery results (ok, error)

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(outcome: &'static str) {
    metrics::counter!("ingress_requests_total", "outcome" => outcome).increment(1);
}

pub fn record_rejected() {
    metrics::counter!("ingress_rejected_total").increment(1);
}

pub fn record_publish(result: &'static str) {
    metrics::counter!("ingress_publish_total", "result" => result).increment(1);
}

pub fn record_delivery(result: &'static str) {
    metrics::counter!("ingress_delivery_total", "result" => result).increment(1);
}
