//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;

use crate::config::schema::{InjectConfig, ServerConfig};
use crate::config::validation::ValidationError;
use crate::inject::Injection;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file.
///
/// Only syntax is checked here. Run [`validate_config`](crate::config::validate_config) once command-line
/// overrides have been applied.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ServerConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Read the payload, from `payload_file` if set, else the inline value.
pub fn load_payload(config: &InjectConfig) -> Result<Bytes, ConfigError> {
    match &config.payload_file {
        Some(path) => fs::read(path).map(Bytes::from).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        }),
        None => Ok(Bytes::from(config.payload.clone())),
    }
}

/// Build the process-wide injection from config.
pub fn build_injection(config: &InjectConfig) -> Result<Injection, ConfigError> {
    let payload = load_payload(config)?;
    if payload.is_empty() {
        tracing::warn!("Injection payload is empty, HTML responses will pass through unmodified");
    }

    Ok(Injection::new(payload, Bytes::from(config.marker.clone()))
        .with_match_at_start(config.match_at_start))
}
