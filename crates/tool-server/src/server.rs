use crate::session::{SessionLimits, SessionStore};
use crate::tool::ToolRegistry;

/// Name advertised in `serverInfo`.
pub const SERVER_NAME: &str = "JFGlobalExpress Courier Services";

/// Shared state behind the MCP endpoint.
#[derive(Debug, Clone)]
pub struct McpServer {
    pub name: String,
    pub version: String,
    pub registry: ToolRegistry,
    pub sessions: SessionStore,
}

impl McpServer {
    pub fn new(name: impl Into<String>, registry: ToolRegistry) -> Self {
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            registry,
            sessions: SessionStore::new(),
        }
    }

    /// Replaces the session table with an empty one bounded by `limits`.
    pub fn with_session_limits(mut self, limits: SessionLimits) -> Self {
        self.sessions = SessionStore::with_limits(limits);
        self
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new(SERVER_NAME, ToolRegistry::with_defaults())
    }
}
