//! JSON-RPC method dispatch.

use serde_json::{Value, json};

use crate::protocol::{
    InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams, ToolResult,
    negotiate_protocol_version,
};
use crate::error::SessionError;
use crate::server::McpServer;
use crate::session::SessionId;

/// Handles `initialize`, opening a session on success.
///
/// Returns no session id when the params are malformed, and an error when the
/// session table is full.
#[tracing::instrument(skip_all)]
pub async fn initialize(
    req: &JsonRpcRequest,
    server: &McpServer,
) -> Result<(Option<SessionId>, JsonRpcResponse), SessionError> {
    metrics::counter!("mcp_requests_total", "method" => "initialize").increment(1);

    let params: InitializeParams = match &req.params {
        Some(v) => match serde_json::from_value(v.clone()) {
            Ok(p) => p,
            Err(e) => {
                let err = JsonRpcError::invalid_params(format!("Invalid initialize params: {e}"));
                return Ok((None, JsonRpcResponse::error(req.id.clone(), err)));
            }
        },
        None => InitializeParams::default(),
    };

    let version = negotiate_protocol_version(params.protocol_version.as_deref());
    let client_name = params.client_info.and_then(|c| c.name);
    let session_id = server.sessions.create(version, client_name).await?;

    let result = json!({
        "protocolVersion": version,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": server.name,
            "version": server.version
        }
    });
    Ok((
        Some(session_id),
        JsonRpcResponse::success(req.id.clone(), result),
    ))
}

/// Handles a notification. Notifications never produce a response.
pub async fn notify(req: &JsonRpcRequest, server: &McpServer, session_id: &SessionId) {
    match req.method.as_str() {
        "notifications/initialized" => {
            if server.sessions.mark_initialized(session_id).await {
                tracing::debug!(%session_id, "client finished initialization");
            } else {
                tracing::debug!(%session_id, "session closed before initialization finished");
            }
        }
        other => tracing::debug!(%session_id, method = other, "ignoring notification"),
    }
}

/// Dispatch a JSON-RPC request within an established session.
#[tracing::instrument(skip(req, server), fields(method = %req.method))]
pub async fn dispatch(
    req: &JsonRpcRequest,
    server: &McpServer,
    session_id: &SessionId,
) -> JsonRpcResponse {
    let method = match req.method.as_str() {
        m @ ("ping" | "tools/list" | "tools/call" | "initialize") => m.to_string(),
        _ => "other".to_string(),
    };
    metrics::counter!("mcp_requests_total", "method" => method).increment(1);

    let pending = server.sessions.get(session_id).await;
    if pending.is_some_and(|s| !s.initialized) {
        tracing::debug!("request received before notifications/initialized");
    }

    match req.method.as_str() {
        "ping" => JsonRpcResponse::success(req.id.clone(), json!({})),

        "initialize" => JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::invalid_request_with("Session already initialized"),
        ),

        "tools/list" => {
            let tools = server.registry.definitions();
            match serde_json::to_value(&tools) {
                Ok(tools) => JsonRpcResponse::success(req.id.clone(), json!({ "tools": tools })),
                Err(e) => JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::internal_error(format!("Failed to list tools: {e}")),
                ),
            }
        }

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid tools/call params: {e}"
                            )),
                        );
                    }
                },
                None => {
                    return JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    );
                }
            };

            let tool_result = call_tool(params, server).await;
            match serde_json::to_value(&tool_result) {
                Ok(result) => JsonRpcResponse::success(req.id.clone(), result),
                Err(e) => JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::internal_error(format!("Failed to encode tool result: {e}")),
                ),
            }
        }

        _ => JsonRpcResponse::error(req.id.clone(), JsonRpcError::method_not_found(&req.method)),
    }
}

async fn call_tool(params: ToolCallParams, server: &McpServer) -> ToolResult {
    let arguments = params.arguments.unwrap_or(Value::Null);
    let outcome = server
        .registry
        .call(&params.name, arguments)
        .await
        .and_then(|value| ToolResult::structured(value).map_err(Into::into));

    match outcome {
        Ok(result) => {
            metrics::counter!("mcp_tool_calls_total", "tool" => params.name, "outcome" => "ok")
                .increment(1);
            result
        }
        Err(err) => {
            tracing::warn!(tool = %params.name, error = %err, "tool call failed");
            metrics::counter!("mcp_tool_calls_total", "tool" => params.name, "outcome" => err.kind())
                .increment(1);
            ToolResult::error(err.to_string())
        }
    }
}
