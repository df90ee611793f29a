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
        .route("/stop", post(stop_handler))
        .route("/reset", post(reset_handler))
        .route("/work/increase", post(increase_handler))
        .route("/work/decrease", post(decrease_handler))
        .route("/preset", post(preset_handler))
        // Choices offered once a countdown expires
        .route("/choose/work", post(choose_work_handler))
        .route("/choose/break", post(choose_break_handler))
        .route("/dismiss", post(dismiss_handler))
        .route("/themes", get(themes_handler))
        .route("/theme/:index", post(select_theme_handler))
        .route("/history", get(history_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
