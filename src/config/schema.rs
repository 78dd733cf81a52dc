//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::inject::{DEFAULT_MARKER, DEFAULT_PAYLOAD};

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener and static file settings.
    pub server: ListenerConfig,

    /// Injection payload and matching rules.
    pub inject: InjectConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Overrides the port of `bind_address` when set.
    pub port: Option<u16>,

    /// Directory static files are served from.
    pub root_dir: PathBuf,
}

impl ListenerConfig {
    /// Resolve the address to bind, applying the port override.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let mut addr: SocketAddr = self.bind_address.parse()?;
        if let Some(port) = self.port {
            addr.set_port(port);
        }
        Ok(addr)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            port: None,
            root_dir: PathBuf::from("public"),
        }
    }
}

/// What gets injected, and where.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InjectConfig {
    /// Disable to serve files untouched.
    pub enabled: bool,

    /// Inline payload, used when `payload_file` is unset.
    pub payload: String,

    /// File whose bytes become the payload. Read once at startup.
    pub payload_file: Option<PathBuf>,

    /// Closing tag the payload is spliced in front of.
    pub marker: String,

    /// Count a marker at the very start of a chunk as a match.
    pub match_at_start: bool,

    /// Fold case when matching `text/html` against content-type.
    pub case_insensitive_content_type: bool,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            payload: DEFAULT_PAYLOAD.to_string(),
            payload_file: None,
            marker: DEFAULT_MARKER.to_string(),
            match_at_start: false,
            case_insensitive_content_type: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.inject.marker, "</html>");
        assert!(config.inject.enabled);
        assert!(!config.inject.match_at_start);
    }

    #[test]
    fn test_full_config() {
        let config: ServerConfig = toml::from_str(
            r#"
            [server]
            bind_address = "127.0.0.1:3000"
            port = 4000
            root_dir = "site"

            [inject]
            payload = "<script src='/live.js'></script>"
            match_at_start = true
            case_insensitive_content_type = false

            [timeouts]
            request_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.server.socket_addr().unwrap(), "127.0.0.1:4000".parse().unwrap());
        assert_eq!(config.server.root_dir, PathBuf::from("site"));
        assert_eq!(config.inject.payload, "<script src='/live.js'></script>");
        assert!(config.inject.match_at_start);
        assert!(!config.inject.case_insensitive_content_type);
        assert_eq!(config.timeouts.request_secs, 5);
    }
}
