//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Standard OpenTelemetry variable for the collector endpoint.
pub const OTLP_ENDPOINT_ENV: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

/// Overrides `profiling.server_address`.
pub const PYROSCOPE_ADDRESS_ENV: &str = "PYROSCOPE_SERVER_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

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

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
///
/// Without a path the built-in defaults are used.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Parse a TOML document. Missing sections fall back to defaults.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup(OTLP_ENDPOINT_ENV).filter(|v| !v.is_empty()) {
        config.telemetry.otlp_endpoint = endpoint;
    }
    if let Some(address) = lookup(PYROSCOPE_ADDRESS_ENV).filter(|v| !v.is_empty()) {
        config.profiling.server_address = address;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogFormat;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.service.name, "sample-app");
        assert_eq!(config.external.timeout_secs, 5);
    }

    #[test]
    fn test_unknown_log_format_is_a_parse_error() {
        let err = parse_config("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides_endpoints() {
        let mut config = ServiceConfig::default();
        apply_env_overrides(&mut config, |key| match key {
            OTLP_ENDPOINT_ENV => Some("http://collector:4317".into()),
            PYROSCOPE_ADDRESS_ENV => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.telemetry.otlp_endpoint, "http://collector:4317");
        // Empty values are ignored.
        assert_eq!(config.profiling.server_address, "http://pyroscope:4040");
    }

    #[test]
    fn test_validation_error_message_lists_all() {
        let err = ConfigError::Validation(vec![
            ValidationError::SampleRatio(2.0),
            ValidationError::EmptyServiceName,
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: telemetry.sample_ratio 2 is outside [0, 1], service.name must not be empty"
        );
    }
}
