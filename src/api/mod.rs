//! HTTP API module: test page, JSON test endpoint, health and metrics.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
