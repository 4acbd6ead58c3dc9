use axum::{Router, routing::get};

use crate::handlers::{health_check, stream_code};
use crate::server::AppState;

/// Create the API router with state
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/stream", get(stream_code))
}
