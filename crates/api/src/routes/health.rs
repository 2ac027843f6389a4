//! Health check endpoint.

use axum::Json;
use serde::Serialize;

pub const SERVICE_NAME: &str = "jfglobalexpress-api";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET /health — returns service health status.
pub async fn check() -> Json<HealthResponse> {
    metrics::counter!("api_requests_total", "route" => "/health").increment(1);
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}
