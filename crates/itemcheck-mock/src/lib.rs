//! Mock REST item service and its client.
//!
//! The server keeps a collection of [`itemcheck_criteria::Record`]s in an
//! [`store::ItemStore`], persisted as YAML after every mutation, and serves
//! them over a small bearer-token protected API. [`client::ApiSession`]
//! drives that API from test scenarios and verifies fetched items against
//! criteria rows.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod logging;
pub mod metrics;
pub mod store;

pub use itemcheck_criteria::Record;
