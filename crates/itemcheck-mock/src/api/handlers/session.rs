//! Session handler: login.

use crate::api::state::AppState;
use crate::api::types::{json_response, Envelope};
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use tracing::info;

/// POST /login - Issue the session token
///
/// No credentials are checked; any caller receives the token.
pub fn handle_login(state: &AppState) -> Response<Full<Bytes>> {
    info!("Issued session token");
    json_response(StatusCode::OK, &Envelope::<()>::token(state.auth.token()))
}
