//! Configuration loading from disk.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Directory searched for environment config files when no path is given.
pub const DEFAULT_CONFIG_DIR: &str = "/app/config";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
    #[error("Unknown environment '{0}' (expected development or production)")]
    UnknownEnvironment(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Deployment environment; selects which config file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// File name of this environment's config inside the config directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Environment::Development => "gateway.dev.toml",
            Environment::Production => "gateway.toml",
        }
    }

    /// Full path of this environment's config file.
    pub fn config_path(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Load the config file belonging to `environment` from `dir`.
pub fn load_for_environment(dir: &Path, environment: Environment) -> Result<GatewayConfig, ConfigError> {
    let path = environment.config_path(dir);
    tracing::debug!(environment = %environment, path = ?path, "Loading environment configuration");
    load_config(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let config = parse_config(
            r#"
            [user_service]
            host = "users.internal"
            port = "9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.user_service.authority(), "users.internal:9000");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.rpc_ms, 10_000);
        assert!(config.listener.tls.is_none());
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let err = parse_config(
            r#"
            [user_service]
            host = ""
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors[0].field, "user_service.host"),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_malformed_toml() {
        assert!(matches!(parse_config("[listener"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_environment_selects_file() {
        let dir = Path::new("/etc/gateway");
        assert_eq!(
            "production".parse::<Environment>().unwrap().config_path(dir),
            PathBuf::from("/etc/gateway/gateway.toml")
        );
        assert_eq!(
            "Development".parse::<Environment>().unwrap().config_path(dir),
            PathBuf::from("/etc/gateway/gateway.dev.toml")
        );
        assert!(matches!(
            "staging".parse::<Environment>(),
            Err(ConfigError::UnknownEnvironment(_))
        ));
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let err = load_config(Path::new("/nonexistent/gateway.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_shipped_configs_are_valid() {
        let dev = parse_config(include_str!("../../config/gateway.dev.toml")).unwrap();
        assert_eq!(dev.observability.log_format, "pretty");

        let prod = parse_config(include_str!("../../config/gateway.toml")).unwrap();
        assert!(prod.observability.metrics_enabled);
        assert_eq!(prod.user_service.authority(), "user-service:50051");
    }
}
