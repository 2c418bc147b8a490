//! Health check handlers.

use axum::Json;

use crate::dto::response::{HealthResponse, RestResponse};

/// GET /health
pub async fn health() -> Json<RestResponse<HealthResponse>> {
    Json(RestResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
