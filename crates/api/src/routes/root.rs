//! Root endpoint.

use axum::Json;
use serde::Serialize;

pub const ROOT_MESSAGE: &str = "JFGlobalExpress API - Ready for implementation";

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// GET / — announces that the API is up.
pub async fn get() -> Json<RootResponse> {
    metrics::counter!("api_requests_total", "route" => "/").increment(1);
    Json(RootResponse {
        message: ROOT_MESSAGE,
    })
}
