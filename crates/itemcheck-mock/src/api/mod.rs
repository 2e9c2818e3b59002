//! REST API for the mock item store.
//!
//! Routes:
//! - `POST /login` issues the bearer token
//! - `GET|POST /items`, `GET|PUT|DELETE /items/{id}` (token required)
//! - `GET /health`, `GET /metrics`
//!
//! Every JSON body is wrapped in an [`Envelope`].

mod handlers;
mod router;
mod server;
mod state;
mod types;

pub use router::route_request;
pub use server::{serve, ItemApiServer};
pub use state::AppState;
pub use types::Envelope;
