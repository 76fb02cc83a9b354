//! HTTP surface for chunk ingestion.
//!
//! - `POST /index/chunk` accepts a chunk, authenticates it and appends it to
//!   the [`Aggregator`](crate::aggregator::Aggregator)
//! - `GET /index/status` reports liveness and the number of stored chunks
//! - `GET /metrics` exposes Prometheus metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use chunk_ingest::web::{AppState, IngestServer};
//!
//! let state = AppState::new(Arc::new(Aggregator::new()));
//! IngestServer::new(state).start(addr).await?;
//! ```

pub mod handlers;
pub mod routes;
pub mod state;

pub use state::AppState;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::aggregator::Aggregator;

/// Default request body limit (2 MiB)
const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// HTTP server hosting the ingestion routes.
pub struct IngestServer {
    state: AppState,
    cors: bool,
    body_limit: usize,
}

impl IngestServer {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            cors: true,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_cors(mut self, cors: bool) -> Self {
        self.cors = cors;
        self
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Handle to the aggregator this server appends to.
    pub fn aggregator(&self) -> Arc<Aggregator> {
        Arc::clone(&self.state.aggregator)
    }

    /// Build the router with the configured middleware applied.
    pub fn router(&self) -> axum::Router {
        let app = routes::create_router(self.state.clone())
            .layer(DefaultBodyLimit::max(self.body_limit));

        if self.cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app.layer(cors)
        } else {
            app
        }
    }

    /// Serve until Ctrl-C is received.
    pub async fn start(self, addr: SocketAddr) -> Result<()> {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;

        info!("Chunk ingestion endpoint listening on http://{}", addr);
        info!("  POST /index/chunk (receive code chunks)");
        info!("  GET  /index/status (indexing status)");
        info!(
            auth = self.state.auth_enabled(),
            indexer = self.state.indexer.is_some(),
            "Server ready"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .with_context(|| "Ingestion server failed")?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}
