//! Relay server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult};
use crate::routes::create_router;
use crate::state::AppState;

/// HTTP server for the LINE webhook and alert endpoints.
#[derive(Debug, Clone)]
pub struct RelayServer {
    state: Arc<AppState>,
}

impl RelayServer {
    /// Create a server around existing state.
    #[must_use]
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Create a server with production state built from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the messaging client cannot be built.
    pub fn from_config(config: &RelayConfig) -> RelayResult<Self> {
        Ok(Self::new(Arc::new(AppState::from_config(config)?)))
    }

    /// Get the shared state.
    #[must_use]
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Start the server and listen for connections.
    ///
    /// This method runs until the server encounters a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self, addr: SocketAddr) -> RelayResult<()> {
        self.serve_with_shutdown(addr, std::future::pending()).await
    }

    /// Start the server with graceful shutdown support.
    ///
    /// The server will shut down when the provided future completes.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, addr: SocketAddr, shutdown: F) -> RelayResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| RelayError::BindFailed(addr, e))?;

        let local_addr = listener.local_addr().unwrap_or(addr);
        info!(addr = %local_addr, "relay server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RelayError::Internal(e.to_string()))?;

        info!("relay server shut down");
        Ok(())
    }

    /// Create the router without starting the server.
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }
}
