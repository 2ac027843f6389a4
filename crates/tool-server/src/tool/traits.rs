use async_trait::async_trait;
use serde_json::Value;

use crate::error::ToolError;

/// A callable tool exposed to MCP clients.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns a human-readable description for clients.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's input parameters.
    fn input_schema(&self) -> Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    /// Invokes the tool. `arguments` is `Value::Null` when the client sent none.
    async fn call(&self, arguments: Value) -> Result<Value, ToolError>;
}
