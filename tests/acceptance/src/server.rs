//! In-process mock item server for scenarios.

use itemcheck_mock::api::{serve, AppState};
use itemcheck_mock::auth::TokenAuthority;
use itemcheck_mock::store::ItemStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to prepare data file: {0}")]
    Io(#[from] std::io::Error),
}

/// Items every scenario starts with.
pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/mock_data.yaml")
}

/// A server bound to an ephemeral port with a private copy of the fixture.
///
/// The server task is aborted when this is dropped.
#[derive(Debug)]
pub struct MockServer {
    pub base_url: String,
    data_file: PathBuf,
    _dir: TempDir,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(seed: Option<&Path>) -> Result<Self, ServerError> {
        let dir = TempDir::new()?;
        let data_file = dir.path().join("mock_data.yaml");
        if let Some(seed) = seed {
            std::fs::copy(seed, &data_file)?;
        }

        let state = Arc::new(AppState::new(
            ItemStore::open(&data_file),
            TokenAuthority::generate(),
        ));
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let handle = tokio::spawn(async move {
            if let Err(e) = serve(listener, state).await {
                tracing::error!("Mock item server stopped: {}", e);
            }
        });

        Ok(Self {
            base_url,
            data_file,
            _dir: dir,
            handle,
        })
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
