//! Proxy observability metrics
//!
//! Prometheus-compatible metrics for:
//! - Route outcomes (success / failure / rejected) per operation
//! - Route latency
//! - Cluster calls by action and status

use std::time::{Duration, Instant};

/// Record a finished route invocation
pub fn record_request(operation: &str, outcome: &str, duration: Duration) {
    metrics::counter!(
        "adproxy_requests_total",
        "operation" => operation.to_string(),
        "outcome" => outcome.to_string(),
    )
    .increment(1);

    metrics::histogram!(
        "adproxy_request_duration_seconds",
        "operation" => operation.to_string(),
    )
    .record(duration.as_secs_f64());
}

/// Record a request rejected before reaching the cluster
pub fn record_rejected(operation: &str) {
    metrics::counter!(
        "adproxy_requests_total",
        "operation" => operation.to_string(),
        "outcome" => "rejected",
    )
    .increment(1);
}

/// Record a cluster call
pub fn record_cluster_call(action: &str, status: &str, duration: Duration) {
    metrics::counter!(
        "adproxy_cluster_calls_total",
        "action" => action.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);

    metrics::histogram!(
        "adproxy_cluster_call_duration_seconds",
        "action" => action.to_string(),
    )
    .record(duration.as_secs_f64());
}

/// Guard for timing a cluster call
pub struct ClusterCallTimer {
    action: &'static str,
    start: Instant,
}

impl ClusterCallTimer {
    pub fn new(action: &'static str) -> Self {
        Self {
            action,
            start: Instant::now(),
        }
    }

    pub fn success(self) {
        record_cluster_call(self.action, "ok", self.start.elapsed());
    }

    pub fn error(self, status: &str) {
        record_cluster_call(self.action, status, self.start.elapsed());
    }
}

/// Guard for timing a route handler
pub struct RequestTimer {
    operation: &'static str,
    start: Instant,
}

impl RequestTimer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }

    pub fn finish(self, ok: bool) {
        let outcome = if ok { "success" } else { "failure" };
        record_request(self.operation, outcome, self.start.elapsed());
    }
}
