//! HTTP API for the JFGlobalExpress courier service.
//!
//! Exposes the root and health endpoints, an OpenAPI document with
//! Swagger UI and ReDoc pages, and Prometheus metrics, with structured
//! logging through tracing.

pub mod error;
pub mod info;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use info::AppInfo;

/// Default listen port for the API service.
pub const DEFAULT_PORT: u16 = 8000;

/// Creates the Axum application router with all routes.
pub fn create_app(info: AppInfo, metrics_handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/", get(routes::root::get))
        .route("/health", get(routes::health::check))
        .route(routes::docs::OPENAPI_URL, get(routes::openapi::get))
        .route("/docs", get(routes::docs::swagger_ui))
        .route("/redoc", get(routes::docs::redoc))
        .with_state(Arc::new(info))
        .merge(common::metrics::router(metrics_handle))
        .fallback(error::not_found)
        .method_not_allowed_fallback(error::method_not_allowed)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
