//! Static application metadata.

use serde::Serialize;

pub const TITLE: &str = "JFGlobalExpress API";
pub const DESCRIPTION: &str = "API for JFGlobalExpress courier service with AI bot integration";

/// Title, description and version published in the OpenAPI document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub title: String,
    pub description: String,
    pub version: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            title: TITLE.to_string(),
            description: DESCRIPTION.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
