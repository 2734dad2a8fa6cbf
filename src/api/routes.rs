//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{api_test, health, index, metrics, AppState};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Connectivity test
        .route("/", get(index))
        .route("/api/test", get(api_test))
        // Health and metrics
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
