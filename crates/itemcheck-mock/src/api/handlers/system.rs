//! System handlers: health, metrics.

use crate::api::state::AppState;
use crate::api::types::*;
use crate::metrics::collect_metrics;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};

/// GET /health - Health check
pub fn handle_health(state: &AppState) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &serde_json::json!({
            "success": true,
            "status": "ok",
            "items": state.store.len(),
        }),
    )
}

/// GET /metrics - Prometheus metrics
pub fn handle_metrics() -> Response<Full<Bytes>> {
    build_response_with_headers(
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        collect_metrics(),
    )
}
