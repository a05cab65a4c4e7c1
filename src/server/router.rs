//! Route table and middleware stack.

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{health, query};
use super::layers::make_cors_layer;
use super::state::AppState;
use crate::config::ServerConfig;
use crate::error::Result;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/query", post(query))
        .route("/health", get(health))
}

/// Builds the full application: routes, state and middleware.
pub fn make_app(state: AppState, config: &ServerConfig) -> Result<Router> {
    let cors = make_cors_layer(&config.allowed_origins)?;

    Ok(create_router()
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        )))
}
