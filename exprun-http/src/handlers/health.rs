use axum::response::Json;

use crate::models::HealthResponse;

/// Health check for the backend service.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
