//! Response envelope and helpers for the item API.

use crate::store::StoreError;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use itemcheck_criteria::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON wrapper shared by every endpoint.
///
/// `success` is always present; the other fields appear only when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            token: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            token: None,
        }
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            token: None,
        }
    }

    pub fn token(token: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: None,
            token: Some(token.into()),
        }
    }
}

// =============================================================================
// Response helper functions
// =============================================================================

/// Create a JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());
    build_response_with_headers(status, [("Content-Type", "application/json")], json)
}

/// Build an HTTP response with headers.
///
/// Falls back to a bare 500 if the builder rejects the inputs.
pub fn build_response_with_headers(
    status: StatusCode,
    headers: impl IntoIterator<Item = (impl AsRef<str>, impl AsRef<str>)>,
    body: impl Into<Bytes>,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(status);
    for (key, value) in headers {
        builder = builder.header(key.as_ref(), value.as_ref());
    }
    builder.body(Full::new(body.into())).unwrap_or_else(|_| {
        let mut resp = Response::new(Full::new(Bytes::from("Internal Server Error")));
        *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        resp
    })
}

/// Create a failure envelope response
pub fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    json_response(status, &Envelope::<()>::failure(message))
}

pub fn not_found() -> Response<Full<Bytes>> {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}

pub fn method_not_allowed(allow: &str) -> Response<Full<Bytes>> {
    let body = serde_json::to_string(&Envelope::<()>::failure("Method Not Allowed"))
        .unwrap_or_else(|_| "{}".to_string());
    build_response_with_headers(
        StatusCode::METHOD_NOT_ALLOWED,
        [("Content-Type", "application/json"), ("Allow", allow)],
        body,
    )
}

pub fn unauthorized() -> Response<Full<Bytes>> {
    let body = serde_json::to_string(&Envelope::<()>::failure("Unauthorized"))
        .unwrap_or_else(|_| "{}".to_string());
    build_response_with_headers(
        StatusCode::UNAUTHORIZED,
        [
            ("Content-Type", "application/json"),
            ("WWW-Authenticate", "Bearer"),
        ],
        body,
    )
}

/// Map a store failure onto its status and public message
pub fn store_error_response(err: &StoreError) -> Response<Full<Bytes>> {
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_response(status, &err.public_message())
}

/// Collect request body into bytes
pub async fn collect_body(req: Request<Incoming>) -> Result<Bytes, String> {
    use http_body_util::BodyExt;
    req.collect()
        .await
        .map(|c| c.to_bytes())
        .map_err(|e| format!("Failed to read request body: {e}"))
}

/// Decode a request body that must be a JSON object.
pub fn parse_record(body: &[u8]) -> Result<Record, String> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| format!("Invalid data: malformed JSON body: {e}"))?;
    Record::try_from(value).map_err(|_| "Invalid data: body must be a JSON object".to_string())
}
