//! Route dispatch for the item API.

use crate::api::handlers::{items, session, system};
use crate::api::state::AppState;
use crate::api::types::{method_not_allowed, not_found, unauthorized};
use crate::auth::AuthError;
use crate::metrics;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::header::AUTHORIZATION;
use hyper::{Method, Request, Response};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Parsed route under `/items`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemRoute {
    /// GET/POST /items
    Collection,
    /// GET/PUT/DELETE /items/:id
    ById(i64),
}

impl ItemRoute {
    /// Parse an `/items` path. The id segment must be plain ASCII digits;
    /// signs, decimals and anything else are not a route.
    fn parse(path: &str) -> Option<Self> {
        let rest = path.strip_prefix("/items")?.trim_end_matches('/');
        if rest.is_empty() {
            return Some(ItemRoute::Collection);
        }
        let segment = rest.strip_prefix('/')?;
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        segment.parse().ok().map(ItemRoute::ById)
    }

    fn label(self) -> &'static str {
        match self {
            ItemRoute::Collection => "/items",
            ItemRoute::ById(_) => "/items/{id}",
        }
    }

    fn allowed_methods(self) -> &'static str {
        match self {
            ItemRoute::Collection => "GET, POST",
            ItemRoute::ById(_) => "GET, PUT, DELETE",
        }
    }
}

/// Main request router
pub async fn route_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    debug!("Item API: {} {}", method, path);

    let (route, response) = route_by_path(&method, &path, req, &state).await;
    metrics::record_request(
        method.as_str(),
        route,
        response.status().as_u16(),
        start.elapsed().as_secs_f64() * 1000.0,
    );
    Ok(response)
}

/// Route based on path, returning the metrics label alongside the response
async fn route_by_path(
    method: &Method,
    path: &str,
    req: Request<Incoming>,
    state: &AppState,
) -> (&'static str, Response<Full<Bytes>>) {
    match path {
        "/login" => {
            let resp = match *method {
                Method::POST => session::handle_login(state),
                _ => method_not_allowed("POST"),
            };
            return ("/login", resp);
        }
        "/health" => {
            let resp = match *method {
                Method::GET => system::handle_health(state),
                _ => method_not_allowed("GET"),
            };
            return ("/health", resp);
        }
        "/metrics" => {
            let resp = match *method {
                Method::GET => system::handle_metrics(),
                _ => method_not_allowed("GET"),
            };
            return ("/metrics", resp);
        }
        _ => {}
    }

    let Some(route) = ItemRoute::parse(path) else {
        return ("unmatched", not_found());
    };

    let supported = matches!(
        (method, route),
        (&Method::GET | &Method::POST, ItemRoute::Collection)
            | (&Method::GET | &Method::PUT | &Method::DELETE, ItemRoute::ById(_))
    );
    if !supported {
        return (route.label(), method_not_allowed(route.allowed_methods()));
    }

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if let Err(e) = state.auth.authorize_header(header) {
        let reason = match e {
            AuthError::MissingCredentials => "missing",
            AuthError::MalformedHeader => "malformed",
            AuthError::InvalidToken => "invalid",
        };
        warn!("Rejected {} {}: {}", method, path, e);
        metrics::record_auth_failure(reason);
        return (route.label(), unauthorized());
    }

    let resp = match (method, route) {
        (&Method::GET, ItemRoute::Collection) => items::handle_list(state),
        (&Method::POST, ItemRoute::Collection) => items::handle_create(req, state).await,
        (&Method::GET, ItemRoute::ById(id)) => items::handle_get(id, state),
        (&Method::PUT, ItemRoute::ById(id)) => items::handle_update(id, req, state).await,
        (&Method::DELETE, ItemRoute::ById(id)) => items::handle_delete(id, state),
        _ => method_not_allowed(route.allowed_methods()),
    };
    (route.label(), resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_route_parse() {
        assert_eq!(ItemRoute::parse("/items"), Some(ItemRoute::Collection));
        assert_eq!(ItemRoute::parse("/items/"), Some(ItemRoute::Collection));
        assert_eq!(ItemRoute::parse("/items/42"), Some(ItemRoute::ById(42)));
        assert_eq!(ItemRoute::parse("/items/007"), Some(ItemRoute::ById(7)));
    }

    #[test]
    fn test_item_route_rejects_signed_ids() {
        assert_eq!(ItemRoute::parse("/items/-3"), None);
        assert_eq!(ItemRoute::parse("/items/+5"), None);
        assert_eq!(ItemRoute::parse("/items/99999999999999999999"), None);
    }

    #[test]
    fn test_item_route_rejects_non_routes() {
        assert_eq!(ItemRoute::parse("/items/abc"), None);
        assert_eq!(ItemRoute::parse("/items/1.5"), None);
        assert_eq!(ItemRoute::parse("/items/1/extra"), None);
        assert_eq!(ItemRoute::parse("/itemsx"), None);
        assert_eq!(ItemRoute::parse("/other"), None);
    }

    #[test]
    fn test_item_route_labels() {
        assert_eq!(ItemRoute::Collection.label(), "/items");
        assert_eq!(ItemRoute::ById(7).label(), "/items/{id}");
        assert_eq!(ItemRoute::ById(7).allowed_methods(), "GET, PUT, DELETE");
    }
}
