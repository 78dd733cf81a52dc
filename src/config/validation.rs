//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A semantic problem with an otherwise well-formed config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address {0:?}")]
    BindAddress(String),

    #[error("root_dir must not be empty")]
    EmptyRootDir,

    #[error("inject.marker must not be empty")]
    EmptyMarker,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),
}

pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.socket_addr().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }
    if config.server.root_dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyRootDir);
    }
    if config.inject.enabled && config.inject.marker.is_empty() {
        errors.push(ValidationError::EmptyMarker);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServerConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.server.bind_address = "not-an-address".into();
        config.inject.marker.clear();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("not-an-address".into()),
                ValidationError::EmptyMarker,
                ValidationError::ZeroTimeout,
            ]
        );
    }

    #[test]
    fn test_empty_marker_allowed_when_disabled() {
        let mut config = ServerConfig::default();
        config.inject.enabled = false;
        config.inject.marker.clear();
        assert!(validate_config(&config).is_ok());
    }
}
