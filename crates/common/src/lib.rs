//! Shared plumbing for the JFGlobalExpress services.
//!
//! Both binaries load their listener settings, install tracing and the
//! Prometheus recorder, and wait for shutdown through this crate.

pub mod config;
pub mod metrics;
pub mod shutdown;
pub mod telemetry;

pub use config::{ConfigError, ListenConfig};
pub use shutdown::shutdown_signal;
