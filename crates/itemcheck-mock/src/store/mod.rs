//! Item persistence layer.

mod error;
mod item_store;
mod persistence;

pub use error::StoreError;
pub use item_store::ItemStore;
pub use persistence::{load_items, save_items, ItemsDocument};
