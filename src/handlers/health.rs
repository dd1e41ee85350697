//! Health check endpoint for service monitoring.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::response::ApiResponse;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// `GET /health` - liveness probe, no authentication, no database touch.
pub async fn health_check() -> ApiResponse<HealthResponse> {
    ApiResponse::success(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}
