//! HTTP API module
//!
//! The remote command service: a single pending-command slot that a phone
//! or browser writes and the overlay reads.

pub mod auth;
pub mod handlers;
pub mod page;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/status", get(status_handler))
        .route("/toggle", get(toggle_handler).post(toggle_handler))
        .route("/reset", get(reset_handler).post(reset_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
