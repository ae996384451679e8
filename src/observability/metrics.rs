//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, endpoint, status
//! - `http_request_duration_seconds` (histogram): latency distribution
//! - `business_operations_total` (counter): simulated work by operation type
//!
//! The same request count and duration are mirrored into OpenTelemetry
//! instruments (`http_requests_total`, `http_request_duration`) which the
//! meter provider exports over OTLP.
//!
//! # Design Decisions
//! - The Prometheus recorder is owned by [`RequestMetrics`], never installed
//!   globally; recording goes through `metrics::with_local_recorder`
//! - Histogram buckets match the Prometheus client defaults

use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{
    BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};
use opentelemetry::metrics::{Counter, Histogram, Meter};
use opentelemetry::KeyValue;
use opentelemetry_otlp::{MetricExporter, WithExportConfig};
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::Resource;

use crate::config::TelemetryConfig;
use crate::observability::ObservabilityError;

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
pub const BUSINESS_OPERATIONS_TOTAL: &str = "business_operations_total";

/// OTLP-side histogram name; unit carried separately as `s`.
pub const OTEL_HTTP_REQUEST_DURATION: &str = "http_request_duration";

/// Content type of the text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

const DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

pub mod labels {
    pub const METHOD: &str = "method";
    pub const ENDPOINT: &str = "endpoint";
    pub const STATUS: &str = "status";
    pub const OPERATION_TYPE: &str = "operation_type";
}

/// Simulated unit of business work, counted in `business_operations_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessOperation {
    SlowOperation,
    ErrorHandled,
    ExternalCallSuccess,
    ExternalCallFailure,
    LoadFast,
    LoadMedium,
    LoadSlow,
}

impl BusinessOperation {
    pub const ALL: [BusinessOperation; 7] = [
        BusinessOperation::SlowOperation,
        BusinessOperation::ErrorHandled,
        BusinessOperation::ExternalCallSuccess,
        BusinessOperation::ExternalCallFailure,
        BusinessOperation::LoadFast,
        BusinessOperation::LoadMedium,
        BusinessOperation::LoadSlow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BusinessOperation::SlowOperation => "slow_operation",
            BusinessOperation::ErrorHandled => "error_handled",
            BusinessOperation::ExternalCallSuccess => "external_call_success",
            BusinessOperation::ExternalCallFailure => "external_call_failure",
            BusinessOperation::LoadFast => "load_fast",
            BusinessOperation::LoadMedium => "load_medium",
            BusinessOperation::LoadSlow => "load_slow",
        }
    }
}

/// Request and business metrics for one service instance.
pub struct RequestMetrics {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    otel_requests: Counter<u64>,
    otel_duration: Histogram<f64>,
}

impl RequestMetrics {
    /// Build the Prometheus recorder and register OTel instruments on `meter`.
    pub fn new(meter: &Meter) -> Result<Self, BuildError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(HTTP_REQUEST_DURATION_SECONDS.to_string()),
                DURATION_BUCKETS,
            )?
            .build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            describe_counter!(HTTP_REQUESTS_TOTAL, "Total HTTP requests");
            describe_histogram!(
                HTTP_REQUEST_DURATION_SECONDS,
                Unit::Seconds,
                "HTTP request latency"
            );
            describe_counter!(BUSINESS_OPERATIONS_TOTAL, "Business operations");

            // Registered up front so the family renders before the first operation.
            for operation in BusinessOperation::ALL {
                counter!(BUSINESS_OPERATIONS_TOTAL, labels::OPERATION_TYPE => operation.as_str())
                    .increment(0);
            }
        });

        let otel_requests = meter
            .u64_counter(HTTP_REQUESTS_TOTAL)
            .with_description("Total number of HTTP requests")
            .with_unit("1")
            .build();
        let otel_duration = meter
            .f64_histogram(OTEL_HTTP_REQUEST_DURATION)
            .with_description("Duration of HTTP requests")
            .with_unit("s")
            .build();

        Ok(Self {
            recorder,
            handle,
            otel_requests,
            otel_duration,
        })
    }

    /// Record one completed request.
    pub fn record_request(&self, method: &str, endpoint: &str, status: u16, elapsed: Duration) {
        let seconds = elapsed.as_secs_f64();

        metrics::with_local_recorder(&self.recorder, || {
            counter!(
                HTTP_REQUESTS_TOTAL,
                labels::METHOD => method.to_string(),
                labels::ENDPOINT => endpoint.to_string(),
                labels::STATUS => status.to_string()
            )
            .increment(1);
            histogram!(HTTP_REQUEST_DURATION_SECONDS).record(seconds);
        });

        self.otel_requests.add(
            1,
            &[
                KeyValue::new(labels::METHOD, method.to_string()),
                KeyValue::new(labels::ENDPOINT, endpoint.to_string()),
                KeyValue::new(labels::STATUS, status.to_string()),
            ],
        );
        self.otel_duration.record(
            seconds,
            &[
                KeyValue::new(labels::METHOD, method.to_string()),
                KeyValue::new(labels::ENDPOINT, endpoint.to_string()),
            ],
        );
    }

    pub fn record_business_operation(&self, operation: BusinessOperation) {
        metrics::with_local_recorder(&self.recorder, || {
            counter!(BUSINESS_OPERATIONS_TOTAL, labels::OPERATION_TYPE => operation.as_str())
                .increment(1);
        });
    }

    /// Render all samples in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Build the meter provider. With OTLP disabled no reader is attached and
/// instruments aggregate nowhere.
pub fn build_meter_provider(
    config: &TelemetryConfig,
    resource: Resource,
) -> Result<SdkMeterProvider, ObservabilityError> {
    let mut builder = SdkMeterProvider::builder().with_resource(resource);

    if config.otlp_enabled {
        let exporter = MetricExporter::builder()
            .with_tonic()
            .with_endpoint(config.otlp_endpoint.clone())
            .build()?;
        let reader = PeriodicReader::builder(exporter)
            .with_interval(Duration::from_millis(config.metric_export_interval_ms))
            .build();
        builder = builder.with_reader(reader);
    }

    Ok(builder.build())
}
