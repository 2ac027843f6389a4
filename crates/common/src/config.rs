//! Listener configuration loaded from environment variables.

use thiserror::Error;

/// Errors raised by strict configuration parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed as a port number.
    #[error("invalid value for {var}: {value:?} is not a port number")]
    InvalidPort { var: &'static str, value: String },
}

/// Listener configuration with per-service defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: supplied by the service)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl ListenConfig {
    /// Defaults for a service listening on `default_port`.
    pub fn with_default_port(default_port: u16) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: default_port,
            log_level: "info".to_string(),
        }
    }

    /// Loads configuration from the process environment, falling back to defaults.
    pub fn from_env(default_port: u16) -> Self {
        Self::from_lookup(default_port, |key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults.
    ///
    /// An unparsable `PORT` is logged and replaced by `default_port`.
    pub fn from_lookup<F>(default_port: u16, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::with_default_port(default_port);
        let port = match parse_port(&lookup) {
            Ok(Some(port)) => port,
            Ok(None) => defaults.port,
            Err(err) => {
                tracing::warn!(error = %err, default_port, "falling back to default port");
                defaults.port
            }
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses `PORT` strictly: `Ok(None)` when unset, an error when malformed.
pub fn parse_port<F>(lookup: F) -> Result<Option<u16>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("PORT") {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidPort { var: "PORT", value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = ListenConfig::with_default_port(8001);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8001);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_unset_port_uses_default() {
        let config = ListenConfig::from_lookup(8001, lookup_from(&[]));
        assert_eq!(config.port, 8001);
        assert_eq!(config.addr(), "0.0.0.0:8001");
    }

    #[test]
    fn test_port_from_environment() {
        let config = ListenConfig::from_lookup(8001, lookup_from(&[("PORT", "9123")]));
        assert_eq!(config.port, 9123);
    }

    #[test]
    fn test_unparsable_port_falls_back() {
        let config = ListenConfig::from_lookup(8001, lookup_from(&[("PORT", "eighty")]));
        assert_eq!(config.port, 8001);

        let config = ListenConfig::from_lookup(8001, lookup_from(&[("PORT", "70000")]));
        assert_eq!(config.port, 8001);
    }

    #[test]
    fn test_host_and_log_level_overrides() {
        let config = ListenConfig::from_lookup(
            8000,
            lookup_from(&[("HOST", "127.0.0.1"), ("RUST_LOG", "debug")]),
        );
        assert_eq!(config.addr(), "127.0.0.1:8000");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_parse_port_strict() {
        assert_eq!(parse_port(lookup_from(&[])), Ok(None));
        assert_eq!(parse_port(lookup_from(&[("PORT", " 8080 ")])), Ok(Some(8080)));
        assert_eq!(
            parse_port(lookup_from(&[("PORT", "abc")])),
            Err(ConfigError::InvalidPort {
                var: "PORT",
                value: "abc".to_string()
            })
        );
    }
}
