//! Route definitions for the ingestion endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use super::state::AppState;

/// Create the router with all ingestion routes.
///
/// Hosts that already run an axum server can `merge` the result into their
/// own router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/index/chunk", post(handlers::receive_chunk))
        .route("/index/status", get(handlers::index_status))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}
