//! Courier service tools.

mod health_check;

pub use health_check::{HealthCheckPayload, HealthCheckTool};
