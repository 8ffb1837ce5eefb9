//! Metrics collection and exposition.
//!
//! # Metrics
//! - `combined_data_requests_total` (counter): requests by status
//! - `combined_data_request_duration_seconds` (histogram): request latency
//! - `combined_data_upstream_fetches_total` (counter): fetches by collection, outcome
//! - `combined_data_upstream_fetch_duration_seconds` (histogram): fetch latency
//! - `combined_data_records_emitted_total` (counter): joined records served
//! - `combined_data_comments_dropped_total` (counter): comments without a post
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::aggregate::types::Collection;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(status: u16, start: Instant) {
    metrics::counter!("combined_data_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("combined_data_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream fetch. `outcome` is `success` or an error kind.
pub fn record_fetch(collection: Collection, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "combined_data_upstream_fetches_total",
        "collection" => collection.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "combined_data_upstream_fetch_duration_seconds",
        "collection" => collection.as_str()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_join(emitted: usize, dropped: usize) {
    metrics::counter!("combined_data_records_emitted_total").increment(emitted as u64);
    metrics::counter!("combined_data_comments_dropped_total").increment(dropped as u64);
}
