//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Check that addresses, origins and methods parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};

use crate::config::schema::GatewayConfig;

/// Log formats understood by the logging subsystem.
pub const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a parsed configuration, collecting every problem.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.trim().is_empty() {
            errors.push(ValidationError::new("listener.tls.cert_path", "must not be empty"));
        }
        if tls.key_path.trim().is_empty() {
            errors.push(ValidationError::new("listener.tls.key_path", "must not be empty"));
        }
    }

    let endpoint = &config.user_service;
    if endpoint.host.trim().is_empty() {
        errors.push(ValidationError::new("user_service.host", "must not be empty"));
    }
    if endpoint.port.trim().is_empty() {
        errors.push(ValidationError::new("user_service.port", "must not be empty"));
    } else if endpoint.port.parse::<u16>().is_err() {
        errors.push(ValidationError::new(
            "user_service.port",
            format!("'{}' is not a valid port", endpoint.port),
        ));
    }

    let timeouts = &config.timeouts;
    if timeouts.connect_secs == 0 {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be greater than 0"));
    }
    if timeouts.rpc_ms == 0 {
        errors.push(ValidationError::new("timeouts.rpc_ms", "must be greater than 0"));
    }
    if timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    } else if timeouts.rpc_ms > timeouts.request_secs.saturating_mul(1000) {
        errors.push(ValidationError::new(
            "timeouts.rpc_ms",
            "must not exceed timeouts.request_secs",
        ));
    }

    for origin in &config.cors.allowed_origins {
        if HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::new(
                "cors.allowed_origins",
                format!("'{}' is not a valid origin", origin),
            ));
        }
    }
    for method in &config.cors.allowed_methods {
        if method.parse::<Method>().is_err() {
            errors.push(ValidationError::new(
                "cors.allowed_methods",
                format!("'{}' is not an HTTP method", method),
            ));
        }
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    let observability = &config.observability;
    if !LOG_FORMATS.contains(&observability.log_format.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_format",
            format!("expected one of {:?}", LOG_FORMATS),
        ));
    }
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", observability.metrics_address),
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
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_problem() {
        let mut config = GatewayConfig::default();
        config.user_service.host = String::new();
        config.user_service.port = "not-a-port".into();
        config.timeouts.rpc_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["user_service.host", "user_service.port", "timeouts.rpc_ms"]
        );
    }

    #[test]
    fn test_rpc_deadline_bounded_by_request_timeout() {
        let mut config = GatewayConfig::default();
        config.timeouts.request_secs = 2;
        config.timeouts.rpc_ms = 2_500;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "timeouts.rpc_ms");
    }

    #[test]
    fn test_rejects_unknown_log_format_and_bad_method() {
        let mut config = GatewayConfig::default();
        config.observability.log_format = "xml".into();
        config.cors.allowed_methods.push("NOT A METHOD".into());

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "observability.log_format"));
        assert!(errors.iter().any(|e| e.field == "cors.allowed_methods"));
    }
}
