pub mod health;
pub mod mcp;
