//! HTTP API module
//!
//! This module exposes the widget view and its triggers over HTTP.

pub mod handlers;
pub mod responses;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/widget", get(widget_handler))
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
