//! Shared state handed to every request.

use crate::auth::TokenAuthority;
use crate::config::ServerConfig;
use crate::metrics;
use crate::store::ItemStore;

pub struct AppState {
    pub store: ItemStore,
    pub auth: TokenAuthority,
}

impl AppState {
    pub fn new(store: ItemStore, auth: TokenAuthority) -> Self {
        metrics::set_items_stored(store.len());
        Self { store, auth }
    }

    /// Open the configured data file and set up the token authority.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            ItemStore::open(&config.store.data_file),
            TokenAuthority::from_config(config.auth.token.as_deref()),
        )
    }
}
