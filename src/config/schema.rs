//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the demo service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service identity reported by `/health` and attached to telemetry.
    pub service: ServiceInfo,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Log output settings.
    pub logging: LoggingConfig,

    /// OTLP trace and metric export.
    pub telemetry: TelemetryConfig,

    /// Continuous profiling agent.
    pub profiling: ProfilingConfig,

    /// Target of the `/external` endpoint.
    pub external: ExternalConfig,
}

/// Service identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    /// Deployment environment tag (e.g., "development").
    pub environment: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: "sample-app".to_string(),
            version: "1.0.0".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upper bound on a single request, in seconds.
    ///
    /// `/generate-load` can legitimately run for up to 50 seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset.
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// OpenTelemetry export configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Export spans and metrics over OTLP gRPC.
    pub otlp_enabled: bool,

    /// OTLP collector endpoint (gRPC).
    pub otlp_endpoint: String,

    /// Interval between metric exports in milliseconds.
    pub metric_export_interval_ms: u64,

    /// Fraction of root traces to sample, in [0, 1].
    pub sample_ratio: f64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            otlp_enabled: true,
            otlp_endpoint: "http://tempo:4317".to_string(),
            metric_export_interval_ms: 5000,
            sample_ratio: 1.0,
        }
    }
}

/// Continuous profiling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfilingConfig {
    pub enabled: bool,

    /// Pyroscope server address.
    pub server_address: String,

    /// CPU samples per second.
    pub sample_rate: u32,
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            server_address: "http://pyroscope:4040".to_string(),
            sample_rate: 100,
        }
    }
}

/// Outbound call used by `/external`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExternalConfig {
    pub url: String,

    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            url: "https://httpbin.org/delay/1".to_string(),
            timeout_secs: 5,
        }
    }
}
