//! MCP tool server for JFGlobalExpress courier services.
//!
//! Hosts courier tools behind the Model Context Protocol over HTTP
//! (`POST`/`DELETE /mcp`), plus `/health` and Prometheus `/metrics`.
//! The only tool so far is `health_check`.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod server;
pub mod session;
pub mod tool;
pub mod tools;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderName;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ToolError, TransportError};
pub use server::{McpServer, SERVER_NAME};
pub use tool::{Tool, ToolRegistry};

/// Default listen port for the tool server.
pub const DEFAULT_PORT: u16 = 8001;

/// Creates the Axum application router for `server`.
pub fn create_app(server: McpServer, metrics_handle: PrometheusHandle) -> Router {
    Router::new()
        .route(
            "/mcp",
            post(routes::mcp::post).delete(routes::mcp::delete),
        )
        .route("/health", get(routes::health::check))
        .with_state(Arc::new(server))
        .merge(common::metrics::router(metrics_handle))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers([HeaderName::from_static(session::SESSION_HEADER)]),
        )
        .layer(TraceLayer::new_for_http())
}
