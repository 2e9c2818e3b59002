//! Prometheus metrics for the mock item server.
//!
//! Tracks request outcomes, item mutations, and the current collection size.
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram_vec, register_int_gauge, CounterVec, Encoder,
    HistogramVec, IntGauge, TextEncoder,
};

lazy_static! {
    /// Total number of requests processed
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        "itemcheck_requests_total",
        "Total number of requests processed by the mock server",
        &["method", "route", "status"]
    )
    .expect("itemcheck_requests_total registers once");

    /// Request handling duration
    pub static ref REQUEST_DURATION_MS: HistogramVec = register_histogram_vec!(
        "itemcheck_request_duration_ms",
        "Histogram of request handling time in milliseconds",
        &["route"],
        vec![0.5, 1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]
    )
    .expect("itemcheck_request_duration_ms registers once");

    /// Item mutations by outcome
    pub static ref ITEM_MUTATIONS_TOTAL: CounterVec = register_counter_vec!(
        "itemcheck_item_mutations_total",
        "Total number of item create/update/delete attempts",
        &["operation", "result"]  // operation: create|update|delete, result: ok|error
    )
    .expect("itemcheck_item_mutations_total registers once");

    /// Rejected authentication attempts
    pub static ref AUTH_FAILURES_TOTAL: CounterVec = register_counter_vec!(
        "itemcheck_auth_failures_total",
        "Total number of requests rejected for missing or invalid tokens",
        &["reason"]
    )
    .expect("itemcheck_auth_failures_total registers once");

    /// Items currently stored
    pub static ref ITEMS_STORED: IntGauge = register_int_gauge!(
        "itemcheck_items_stored",
        "Number of items currently held by the store"
    )
    .expect("itemcheck_items_stored registers once");
}

/// Collect and return all metrics in Prometheus text format
pub fn collect_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8(buffer).unwrap_or_default()
}

pub fn record_request(method: &str, route: &str, status: u16, duration_ms: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[method, route, &status.to_string()])
        .inc();
    REQUEST_DURATION_MS
        .with_label_values(&[route])
        .observe(duration_ms);
}

pub fn record_mutation(operation: &str, success: bool) {
    let result = if success { "ok" } else { "error" };
    ITEM_MUTATIONS_TOTAL
        .with_label_values(&[operation, result])
        .inc();
}

pub fn record_auth_failure(reason: &str) {
    AUTH_FAILURES_TOTAL.with_label_values(&[reason]).inc();
}

pub fn set_items_stored(count: usize) {
    ITEMS_STORED.set(count as i64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        record_request("GET", "/items", 200, 1.5);
        record_mutation("create", true);
        record_auth_failure("missing");
        set_items_stored(3);

        let metrics = collect_metrics();
        assert!(metrics.contains("itemcheck_requests_total"));
        assert!(metrics.contains("itemcheck_request_duration_ms"));
        assert!(metrics.contains("itemcheck_item_mutations_total"));
        assert!(metrics.contains("itemcheck_auth_failures_total"));
        assert!(metrics.contains("itemcheck_items_stored"));
    }

    #[test]
    fn test_request_labels() {
        record_request("DELETE", "/items/{id}", 404, 0.2);
        let count = REQUESTS_TOTAL
            .with_label_values(&["DELETE", "/items/{id}", "404"])
            .get();
        assert!(count >= 1.0);
    }
}
