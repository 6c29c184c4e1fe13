//! Prometheus metrics for the HTTP request pipeline.
//!
//! Three instruments, all write-only from the handlers' perspective:
//! - total request counter
//! - error counter (non-2xx responses)
//! - request duration histogram keyed by final status code
//!
//! The sink is a [`Metrics`] value constructed once at startup and passed
//! explicitly through the application state, not a hidden global. It also
//! keeps process-local tallies so tests can read back what was observed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

/// Total HTTP requests counter metric name.
pub const METRIC_REQUEST_COUNT: &str = "todo_service_http_request_count";
/// HTTP error responses counter metric name.
pub const METRIC_ERRORS_COUNT: &str = "todo_service_http_errors_count";
/// Request duration histogram metric name.
pub const METRIC_REQUEST_DURATION: &str = "todo_service_http_request_duration_seconds";

/// Initialize all metric descriptions.
/// Call this once at startup after installing the recorder.
pub fn init_metrics() {
    describe_counter!(METRIC_REQUEST_COUNT, "The total number of HTTP requests");
    describe_counter!(METRIC_ERRORS_COUNT, "The total number of HTTP errors");
    describe_histogram!(
        METRIC_REQUEST_DURATION,
        "HTTP request duration in seconds, labeled by final status"
    );

    debug!("Metrics initialized");
}

#[derive(Debug, Default)]
struct Counts {
    requests: AtomicU64,
    errors: AtomicU64,
}

/// Request metrics sink shared across all handlers.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counts: Arc<Counts>,
}

impl Metrics {
    /// Create a new metrics sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished request: duration keyed by final status, the
    /// total counter, and the error counter for non-2xx responses.
    ///
    /// Must be called exactly once per request, on every exit path.
    pub fn observe_request(&self, started: Instant, status: StatusCode) {
        let seconds = started.elapsed().as_secs_f64();

        histogram!(METRIC_REQUEST_DURATION, "status" => status.as_u16().to_string())
            .record(seconds);
        counter!(METRIC_REQUEST_COUNT).increment(1);
        self.counts.requests.fetch_add(1, Ordering::Relaxed);

        if !status.is_success() {
            counter!(METRIC_ERRORS_COUNT).increment(1);
            self.counts.errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Requests observed so far by this sink.
    pub fn request_count(&self) -> u64 {
        self.counts.requests.load(Ordering::Relaxed)
    }

    /// Error responses observed so far by this sink.
    pub fn error_count(&self) -> u64 {
        self.counts.errors.load(Ordering::Relaxed)
    }
}
