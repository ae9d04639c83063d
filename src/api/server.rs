//! API Server
//!
//! Owns the TCP listener lifecycle for the REST API and wires in the
//! request-tracing and CORS layers.

use crate::error::{Error, Result};
use crate::roster::RosterStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::rest::RestRouter;

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the API server
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Bind address
    pub addr: SocketAddr,
    /// Directory holding the static front-end assets
    pub static_dir: PathBuf,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8000".parse().unwrap(),
            static_dir: PathBuf::from("static"),
        }
    }
}

// =============================================================================
// API Server
// =============================================================================

/// REST API server for the activity roster
pub struct ApiServer {
    config: ApiServerConfig,
    store: Arc<RosterStore>,
    shutdown_tx: broadcast::Sender<()>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiServerConfig, store: Arc<RosterStore>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            store,
            shutdown_tx,
        }
    }

    /// Run the server until shutdown is triggered
    pub async fn run(&self) -> Result<()> {
        let app = RestRouter::new(self.store.clone(), self.config.static_dir.clone())
            .build()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let listener = tokio::net::TcpListener::bind(self.config.addr)
            .await
            .map_err(|e| {
                Error::Configuration(format!("Failed to bind {}: {}", self.config.addr, e))
            })?;

        info!("REST API listening on {}", self.config.addr);

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("REST server shutting down");
            })
            .await
            .map_err(|e| Error::Internal(format!("REST server error: {}", e)))?;

        Ok(())
    }

    /// Trigger graceful shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}
