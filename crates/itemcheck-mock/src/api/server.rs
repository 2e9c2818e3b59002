//! Item API server.

use crate::api::router::route_request;
use crate::api::state::AppState;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

/// HTTP server exposing the item store
pub struct ItemApiServer {
    addr: SocketAddr,
    state: Arc<AppState>,
}

impl ItemApiServer {
    pub fn new(addr: SocketAddr, state: Arc<AppState>) -> Self {
        Self { addr, state }
    }

    /// Bind the configured address and serve until the task is dropped
    pub async fn run(self) -> Result<(), anyhow::Error> {
        let listener = TcpListener::bind(self.addr).await?;
        serve(listener, self.state).await
    }
}

/// Accept connections on an already-bound listener.
///
/// Binding to port 0 and passing the listener in lets callers learn the
/// ephemeral port before serving.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<(), anyhow::Error> {
    info!(
        "Mock item API listening on http://{}",
        listener.local_addr()?
    );

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let state = Arc::clone(&state);

        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { route_request(req, state).await }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!("Item API connection error: {}", e);
            }
        });
    }
}
