use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::ToolError;
use crate::tool::Tool;

pub const SERVICE_NAME: &str = "jfglobalexpress-fastmcp";
pub const READY_MESSAGE: &str = "FastMCP server ready for courier service tools";

/// Fixed payload reported by the health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckPayload {
    pub status: &'static str,
    pub service: &'static str,
    pub message: &'static str,
}

impl HealthCheckPayload {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            service: SERVICE_NAME,
            message: READY_MESSAGE,
        }
    }
}

/// Zero-argument liveness tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthCheckTool;

#[async_trait]
impl Tool for HealthCheckTool {
    fn name(&self) -> &str {
        "health_check"
    }

    fn description(&self) -> &str {
        "Health check tool for MCP server"
    }

    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        // Extra keys are ignored; anything other than an object is rejected.
        if !(arguments.is_null() || arguments.is_object()) {
            return Err(ToolError::InvalidArguments {
                tool: self.name().to_string(),
                reason: "arguments must be an object".to_string(),
            });
        }

        Ok(serde_json::to_value(HealthCheckPayload::healthy())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_fixed_payload() {
        let out = HealthCheckTool.call(Value::Null).await.unwrap();
        assert_eq!(
            out,
            serde_json::json!({
                "status": "healthy",
                "service": "jfglobalexpress-fastmcp",
                "message": "FastMCP server ready for courier service tools"
            })
        );
    }

    #[tokio::test]
    async fn empty_object_arguments_accepted() {
        let out = HealthCheckTool.call(serde_json::json!({})).await.unwrap();
        assert_eq!(out["status"], "healthy");
    }

    #[tokio::test]
    async fn non_object_arguments_rejected() {
        let err = HealthCheckTool
            .call(serde_json::json!([1, 2]))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[test]
    fn payload_field_order() {
        let text = serde_json::to_string(&HealthCheckPayload::healthy()).unwrap();
        assert_eq!(
            text,
            r#"{"status":"healthy","service":"jfglobalexpress-fastmcp","message":"FastMCP server ready for courier service tools"}"#
        );
    }
}
