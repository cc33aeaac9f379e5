//! Prometheus metrics for core components.
//!
//! Covers the upstream HTTP client and the fan-out executor. The server
//! crate registers these into its registry alongside the HTTP metrics.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

/// Upstream requests total by operation and outcome.
pub static UPSTREAM_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "catwalk_upstream_requests_total",
            "Total requests issued to the upstream cat API",
        ),
        &["operation", "status"], // status: "success", "error"
    )
    .unwrap()
});

/// Upstream request duration in seconds.
pub static UPSTREAM_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "catwalk_upstream_request_duration_seconds",
            "Duration of upstream cat API calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["operation"],
    )
    .unwrap()
});

/// Fan-out batches collected by policy and outcome.
pub static FANOUT_BATCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "catwalk_fanout_batches_total",
            "Fan-out batches collected by policy",
        ),
        &["policy", "result"], // result: "success", "error", "aborted"
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(UPSTREAM_REQUESTS.clone()),
        Box::new(UPSTREAM_REQUEST_DURATION.clone()),
        Box::new(FANOUT_BATCHES.clone()),
    ]
}
