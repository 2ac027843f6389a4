//! Streamable-HTTP transport for MCP (JSON responses only).

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::error::TransportError;
use crate::handlers;
use crate::protocol::JsonRpcRequest;
use crate::server::McpServer;
use crate::session::{SESSION_HEADER, SessionId};

/// POST /mcp — accepts one JSON-RPC message.
#[tracing::instrument(skip_all)]
pub async fn post(
    State(server): State<Arc<McpServer>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, TransportError> {
    let req = parse_message(&body)?;

    if req.method == "initialize" && !headers.contains_key(SESSION_HEADER) {
        if req.is_notification() {
            return Err(TransportError::InvalidRequest(
                "Invalid Request: initialize must carry an id".into(),
            ));
        }

        let (session_id, resp) = handlers::initialize(&req, &server).await?;
        let mut response = Json(resp).into_response();
        if let Some(value) =
            session_id.and_then(|id| HeaderValue::from_str(&id.to_string()).ok())
        {
            response.headers_mut().insert(SESSION_HEADER, value);
        }
        return Ok(response);
    }

    let session_id = session_from_headers(&headers, &server).await?;

    if req.is_notification() {
        handlers::notify(&req, &server, &session_id).await;
        return Ok(StatusCode::ACCEPTED.into_response());
    }

    let resp = handlers::dispatch(&req, &server, &session_id).await;
    Ok(Json(resp).into_response())
}

/// DELETE /mcp — terminates the caller's session.
#[tracing::instrument(skip_all)]
pub async fn delete(
    State(server): State<Arc<McpServer>>,
    headers: HeaderMap,
) -> Result<StatusCode, TransportError> {
    let session_id = session_from_headers(&headers, &server).await?;
    if server.sessions.remove(&session_id).await {
        Ok(StatusCode::OK)
    } else {
        Err(TransportError::UnknownSession)
    }
}

fn parse_message(body: &[u8]) -> Result<JsonRpcRequest, TransportError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| TransportError::Parse)?;

    if value.is_array() {
        return Err(TransportError::InvalidRequest(
            "Invalid Request: batch messages are not supported".into(),
        ));
    }

    let req: JsonRpcRequest = serde_json::from_value(value)
        .map_err(|e| TransportError::InvalidRequest(format!("Invalid Request: {e}")))?;

    if req.jsonrpc != "2.0" {
        return Err(TransportError::InvalidRequest(
            "Invalid Request: jsonrpc must be \"2.0\"".into(),
        ));
    }

    Ok(req)
}

async fn session_from_headers(
    headers: &HeaderMap,
    server: &McpServer,
) -> Result<SessionId, TransportError> {
    let raw = headers
        .get(SESSION_HEADER)
        .ok_or(TransportError::MissingSession)?;

    let session_id: SessionId = raw
        .to_str()
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(TransportError::UnknownSession)?;

    if server.sessions.touch(&session_id).await {
        Ok(session_id)
    } else {
        Err(TransportError::UnknownSession)
    }
}
