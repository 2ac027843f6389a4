//! Tool abstraction and registry.

mod registry;
mod traits;

pub use registry::{ToolDefinition, ToolRegistry};
pub use traits::Tool;
