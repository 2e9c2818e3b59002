//! Step definitions for the item API scenarios

mod given;
mod then;
mod when;
