//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/interval", post(set_interval_handler))
        .route("/intervals", get(intervals_handler))
        .route("/message", post(set_message_handler))
        .route("/autostart", post(autostart_handler))
        .route("/defaults", post(restore_defaults_handler))
        .route("/test", post(test_reminder_handler))
        .route("/restart", post(restart_handler))
        .route("/quit", post(quit_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .route("/developer", get(developer_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
