//! Tool server error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::protocol::{JsonRpcError, JsonRpcResponse};

/// Errors raised while invoking a tool.
///
/// These surface to the client as tool results with `isError: true`,
/// not as JSON-RPC errors.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool is registered under the requested name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The arguments did not match the tool's input schema.
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// The tool output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Short label used for the `outcome` metric dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::UnknownTool(_) => "unknown_tool",
            ToolError::InvalidArguments { .. } => "invalid_arguments",
            ToolError::Serialization(_) => "serialization",
        }
    }
}

/// Errors raised by the session table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The table already holds the maximum number of live sessions.
    #[error("Service Unavailable: session limit of {0} reached")]
    CapacityReached(usize),
}

/// Transport-level rejections on the `/mcp` endpoint.
///
/// Rendered as a JSON-RPC error body with `id: null` and a non-2xx status.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The body is not valid JSON.
    #[error("Parse error")]
    Parse,

    /// The body is JSON but not an acceptable JSON-RPC message.
    #[error("{0}")]
    InvalidRequest(String),

    /// A non-initialize message arrived without a session header.
    #[error("Bad Request: Missing session ID")]
    MissingSession,

    /// The session header does not name a live session.
    #[error("Session not found")]
    UnknownSession,

    /// A new session could not be opened.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl TransportError {
    pub fn status(&self) -> StatusCode {
        match self {
            TransportError::Parse
            | TransportError::InvalidRequest(_)
            | TransportError::MissingSession => StatusCode::BAD_REQUEST,
            TransportError::UnknownSession => StatusCode::NOT_FOUND,
            TransportError::Session(SessionError::CapacityReached(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }

    fn rpc_error(&self) -> JsonRpcError {
        match self {
            TransportError::Parse => JsonRpcError::parse_error(),
            TransportError::Session(err) => JsonRpcError::server_error(err.to_string()),
            _ => JsonRpcError::invalid_request_with(self.to_string()),
        }
    }
}

impl IntoResponse for TransportError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "rejecting MCP message");
        let body = JsonRpcResponse::error(None, self.rpc_error());
        (self.status(), axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_status_mapping() {
        assert_eq!(TransportError::Parse.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            TransportError::MissingSession.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TransportError::UnknownSession.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn transport_rpc_codes() {
        assert_eq!(TransportError::Parse.rpc_error().code, -32700);
        let err = TransportError::MissingSession.rpc_error();
        assert_eq!(err.code, -32600);
        assert_eq!(err.message, "Bad Request: Missing session ID");
    }

    #[test]
    fn session_capacity_is_service_unavailable() {
        let err = TransportError::from(SessionError::CapacityReached(4));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let rpc = err.rpc_error();
        assert_eq!(rpc.code, -32000);
        assert_eq!(rpc.message, "Service Unavailable: session limit of 4 reached");
    }

    #[test]
    fn tool_error_messages() {
        assert_eq!(
            ToolError::UnknownTool("track_parcel".into()).to_string(),
            "Unknown tool: track_parcel"
        );
        assert_eq!(ToolError::UnknownTool("x".into()).kind(), "unknown_tool");
    }
}
