//! Item handlers: list, get, create, update, delete.

use crate::api::state::AppState;
use crate::api::types::*;
use crate::metrics;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use itemcheck_criteria::Record;
use tracing::debug;

/// GET /items - List every item
pub fn handle_list(state: &AppState) -> Response<Full<Bytes>> {
    let items = state.store.list();
    debug!("Listing {} items", items.len());
    json_response(StatusCode::OK, &Envelope::ok(items))
}

/// GET /items/:id - Get a single item
pub fn handle_get(id: i64, state: &AppState) -> Response<Full<Bytes>> {
    match state.store.get(id) {
        Ok(item) => json_response(StatusCode::OK, &Envelope::ok(item)),
        Err(e) => store_error_response(&e),
    }
}

async fn read_record(req: Request<Incoming>) -> Result<Record, Response<Full<Bytes>>> {
    let body = collect_body(req)
        .await
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e))?;
    parse_record(&body).map_err(|e| error_response(StatusCode::BAD_REQUEST, &e))
}

/// POST /items - Create an item
pub async fn handle_create(req: Request<Incoming>, state: &AppState) -> Response<Full<Bytes>> {
    let candidate = match read_record(req).await {
        Ok(record) => record,
        Err(resp) => {
            metrics::record_mutation("create", false);
            return resp;
        }
    };

    let result = state.store.create(candidate);
    metrics::record_mutation("create", result.is_ok());
    match result {
        Ok(item) => {
            metrics::set_items_stored(state.store.len());
            json_response(StatusCode::CREATED, &Envelope::ok(item))
        }
        Err(e) => store_error_response(&e),
    }
}

/// PUT /items/:id - Merge fields onto an item
pub async fn handle_update(
    id: i64,
    req: Request<Incoming>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let partial = match read_record(req).await {
        Ok(record) => record,
        Err(resp) => {
            metrics::record_mutation("update", false);
            return resp;
        }
    };

    let result = state.store.update(id, partial);
    metrics::record_mutation("update", result.is_ok());
    match result {
        Ok(item) => json_response(StatusCode::OK, &Envelope::ok(item)),
        Err(e) => store_error_response(&e),
    }
}

/// DELETE /items/:id - Remove an item
pub fn handle_delete(id: i64, state: &AppState) -> Response<Full<Bytes>> {
    let result = state.store.delete(id);
    metrics::record_mutation("delete", result.is_ok());
    match result {
        Ok(()) => {
            metrics::set_items_stored(state.store.len());
            json_response(StatusCode::OK, &Envelope::<()>::message("Item deleted"))
        }
        Err(e) => store_error_response(&e),
    }
}
