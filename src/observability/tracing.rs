//! Distributed tracing support.
//!
//! # Responsibilities
//! - Build the OpenTelemetry tracer provider (OTLP gRPC batch export)
//! - Extract W3C trace context from incoming requests
//! - Propagate trace context on outbound requests
//! - Create the per-request server span
//!
//! Application code creates spans with `tracing` macros; the
//! `tracing-opentelemetry` layer installed by `logging` turns them into
//! OpenTelemetry spans.

use std::time::Duration;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, Response};
use opentelemetry::propagation::{Extractor, Injector};
use opentelemetry::{global, Context};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};
use opentelemetry_sdk::Resource;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::config::TelemetryConfig;
use crate::observability::ObservabilityError;

/// Header set by the request id layer.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Build the tracer provider. Spans are only exported when OTLP is enabled.
pub fn build_tracer_provider(
    config: &TelemetryConfig,
    resource: Resource,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let sampler = Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
        config.sample_ratio,
    )));
    let mut builder = SdkTracerProvider::builder()
        .with_sampler(sampler)
        .with_resource(resource);

    if config.otlp_enabled {
        let exporter = SpanExporter::builder()
            .with_tonic()
            .with_endpoint(config.otlp_endpoint.clone())
            .build()?;
        builder = builder.with_batch_exporter(exporter);
    }

    Ok(builder.build())
}

/// Register the W3C trace context propagator process-wide.
pub fn install_propagator() {
    global::set_text_map_propagator(TraceContextPropagator::new());
}

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

struct HeaderInjector<'a>(&'a mut HeaderMap);

impl Injector for HeaderInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            self.0.insert(name, value);
        }
    }
}

/// Parent context carried by the request headers, if any.
pub fn extract_context(headers: &HeaderMap) -> Context {
    global::get_text_map_propagator(|propagator| propagator.extract(&HeaderExtractor(headers)))
}

/// Write the current span's context into outbound `headers`.
pub fn inject_current_context(headers: &mut HeaderMap) {
    let context = Span::current().context();
    global::get_text_map_propagator(|propagator| {
        propagator.inject_context(&context, &mut HeaderInjector(headers))
    });
}

/// Server span for one inbound request, parented to the caller's trace.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let method = request.method();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or("unknown");
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let span = tracing::info_span!(
        "http_request",
        otel.name = %format!("{method} {route}"),
        otel.kind = "server",
        http.request.method = %method,
        http.route = route,
        url.path = %request.uri().path(),
        request_id = %request_id,
        http.response.status_code = tracing::field::Empty,
    );
    if let Err(e) = span.set_parent(extract_context(request.headers())) {
        tracing::debug!(error = ?e, "Could not attach remote parent to request span");
    }
    span
}

/// Close out the request span with the final status.
pub fn record_response(response: &Response<Body>, latency: Duration, span: &Span) {
    let status = response.status().as_u16();
    span.record("http.response.status_code", status);
    tracing::debug!(
        status,
        latency_ms = latency.as_millis() as u64,
        "Request finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injector_skips_invalid_header_values() {
        let mut headers = HeaderMap::new();
        let mut injector = HeaderInjector(&mut headers);
        injector.set("traceparent", "00-abc-def-01".to_string());
        injector.set("bad header", "value".to_string());
        injector.set("tracestate", "line\nbreak".to_string());

        assert_eq!(headers.len(), 1);
        assert_eq!(headers["traceparent"], "00-abc-def-01");
    }

    #[test]
    fn test_extractor_reads_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("traceparent", HeaderValue::from_static("00-1-2-01"));
        let extractor = HeaderExtractor(&headers);

        assert_eq!(extractor.get("traceparent"), Some("00-1-2-01"));
        assert_eq!(extractor.get("tracestate"), None);
        assert_eq!(extractor.keys(), vec!["traceparent"]);
    }

    #[test]
    fn test_request_span_continues_incoming_trace() {
        use opentelemetry::trace::{TraceContextExt, TracerProvider as _};
        use tracing_subscriber::layer::SubscriberExt;

        install_propagator();
        let provider = SdkTracerProvider::builder().build();
        let subscriber = tracing_subscriber::registry()
            .with(tracing_opentelemetry::layer().with_tracer(provider.tracer("test")));

        let request = Request::builder()
            .uri("/external")
            .header(
                "traceparent",
                "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01",
            )
            .body(Body::empty())
            .unwrap();

        let span_context = tracing::subscriber::with_default(subscriber, || {
            let span = make_request_span(&request);
            span.context().span().span_context().clone()
        });

        assert_eq!(
            span_context.trace_id().to_string(),
            "4bf92f3577b34da6a3ce929d0e0e4736"
        );
        assert_ne!(span_context.span_id().to_string(), "00f067aa0ba902b7");
        assert!(span_context.is_sampled());
    }

    #[test]
    fn test_disabled_export_builds_provider() {
        let config = TelemetryConfig {
            otlp_enabled: false,
            ..TelemetryConfig::default()
        };
        let provider = build_tracer_provider(&config, Resource::builder().build());
        assert!(provider.is_ok());
    }
}
