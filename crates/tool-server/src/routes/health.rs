//! Health check endpoint.

use axum::Json;

use crate::tools::HealthCheckPayload;

/// GET /health — same payload as the `health_check` tool, for orchestrators.
pub async fn check() -> Json<HealthCheckPayload> {
    Json(HealthCheckPayload::healthy())
}
