//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and addresses.
//! All problems are reported together rather than stopping at the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("{field} `{value}` is not a valid URL")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("telemetry.sample_ratio {0} is outside [0, 1]")]
    SampleRatio(f64),

    #[error("service.name must not be empty")]
    EmptyServiceName,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.service.name.trim().is_empty() {
        errors.push(ValidationError::EmptyServiceName);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "timeouts.request_secs",
        });
    }

    check_url(&mut errors, "telemetry.otlp_endpoint", &config.telemetry.otlp_endpoint);
    if config.telemetry.metric_export_interval_ms == 0 {
        errors.push(ValidationError::Zero {
            field: "telemetry.metric_export_interval_ms",
        });
    }
    let ratio = config.telemetry.sample_ratio;
    if !(0.0..=1.0).contains(&ratio) {
        errors.push(ValidationError::SampleRatio(ratio));
    }

    check_url(&mut errors, "profiling.server_address", &config.profiling.server_address);
    if config.profiling.sample_rate == 0 {
        errors.push(ValidationError::Zero {
            field: "profiling.sample_rate",
        });
    }

    check_url(&mut errors, "external.url", &config.external.url);
    if config.external.timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "external.timeout_secs",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if Url::parse(value).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}
