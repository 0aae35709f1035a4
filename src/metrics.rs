// Metrics and observability module
// This file handles collection and reporting of optimizer metrics
//
// Numan Thabit 2025 Nov

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec, TextEncoder,
};

pub static ROUTE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "router_route_requests_total",
        "route optimizations by outcome",
        &["outcome"]
    )
    .unwrap()
});

pub static ROUTE_COMBINATIONS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "router_combinations_evaluated",
        "offer subsets evaluated per optimization",
        prometheus::exponential_buckets(1.0, 4.0, 10).unwrap()
    )
    .unwrap()
});

pub static ROUTE_LATENCY: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "router_optimize_seconds",
        "wall time of a route optimization"
    )
    .unwrap()
});

/// Text exposition of the default registry
pub fn render() -> String {
    let mut buf = Vec::new();
    if let Err(err) = TextEncoder::new().encode(&prometheus::gather(), &mut buf) {
        tracing::warn!(error = %err, "metrics encoding failed");
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}
