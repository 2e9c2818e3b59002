//! Support code for the item API acceptance scenarios.

pub mod server;
pub mod table;
pub mod world;
