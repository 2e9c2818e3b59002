//! HTTP request handlers.

pub mod items;
pub mod session;
pub mod system;
