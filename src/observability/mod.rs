//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request layer produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → tracing.rs (spans with W3C trace context)
//!     → profiling.rs (CPU samples, out of band)
//!
//! Consumers:
//!     → Log output (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape) and OTLP metric export
//!     → OTLP trace export
//!     → Pyroscope server
//! ```
//!
//! # Design Decisions
//! - One [`Observability`] context per process, built from config at
//!   startup and handed to the request layer by `Arc`
//! - No global metrics recorder; tests build isolated contexts

pub mod logging;
pub mod metrics;
pub mod profiling;
pub mod tracing;

use opentelemetry::metrics::MeterProvider as _;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use opentelemetry_sdk::Resource;
use thiserror::Error;

use crate::config::{ServiceInfo, TelemetryConfig};

pub use self::metrics::{BusinessOperation, RequestMetrics};
pub use self::profiling::Profiler;

/// Instrumentation scope name for meters and tracers.
const INSTRUMENTATION_SCOPE: &str = "sample-app";

/// Errors raised while initializing observability.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("failed to build OTLP exporter: {0}")]
    OtlpExporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("failed to build Prometheus recorder: {0}")]
    Prometheus(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to initialize tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),

    #[cfg(feature = "profiling")]
    #[error("failed to start profiler: {0}")]
    Profiler(#[from] pyroscope::PyroscopeError),
}

/// Process-wide instrumentation state.
pub struct Observability {
    metrics: RequestMetrics,
    tracer_provider: SdkTracerProvider,
    meter_provider: SdkMeterProvider,
}

impl Observability {
    /// Build providers and instruments.
    ///
    /// With OTLP enabled this must run inside a Tokio runtime, since the
    /// gRPC exporters are created eagerly.
    pub fn new(service: &ServiceInfo, config: &TelemetryConfig) -> Result<Self, ObservabilityError> {
        let resource = Resource::builder()
            .with_service_name(service.name.clone())
            .with_attributes([
                KeyValue::new("service.version", service.version.clone()),
                KeyValue::new("deployment.environment", service.environment.clone()),
            ])
            .build();

        let tracer_provider = tracing::build_tracer_provider(config, resource.clone())?;
        let meter_provider = metrics::build_meter_provider(config, resource)?;
        let metrics = RequestMetrics::new(&meter_provider.meter(INSTRUMENTATION_SCOPE))?;

        Ok(Self {
            metrics,
            tracer_provider,
            meter_provider,
        })
    }

    pub fn metrics(&self) -> &RequestMetrics {
        &self.metrics
    }

    /// Tracer for the `tracing-opentelemetry` bridge.
    pub fn tracer(&self) -> SdkTracer {
        self.tracer_provider.tracer(INSTRUMENTATION_SCOPE)
    }

    /// Flush pending spans and metrics, then stop the exporters.
    pub fn shutdown(&self) {
        if let Err(e) = self.tracer_provider.shutdown() {
            ::tracing::warn!(error = %e, "Tracer provider shutdown failed");
        }
        if let Err(e) = self.meter_provider.shutdown() {
            ::tracing::warn!(error = %e, "Meter provider shutdown failed");
        }
    }
}
