//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all demo handlers
//! - Wire up middleware (request id, tracing, instrumentation, timeout,
//!   panic recovery)
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::handlers::{self, Endpoint};
use crate::http::middleware::instrument_request;
use crate::http::request::{propagate_request_id, set_request_id};
use crate::observability::tracing::{make_request_span, record_response};
use crate::observability::Observability;

/// Error type for server construction and serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub observability: Arc<Observability>,
    /// Pooled client for `/external`.
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(
        config: Arc<ServiceConfig>,
        observability: Arc<Observability>,
    ) -> Result<Self, ServerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.external.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            observability,
            client,
        })
    }
}

/// Build the Axum router with all middleware layers.
///
/// Layers listed last run first: the request id is assigned before the
/// request span opens, and instrumentation sits outside the timeout and
/// panic layers so their responses are counted too.
#[allow(deprecated)]
pub fn build_router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config.timeouts.request_secs);
    let observability = state.observability.clone();

    Router::new()
        .route(Endpoint::Home.path(), get(handlers::home::home))
        .route(Endpoint::Slow.path(), get(handlers::slow::slow_operation))
        .route(Endpoint::Error.path(), get(handlers::errors::error_scenario))
        .route(Endpoint::External.path(), get(handlers::external::external_call))
        .route(Endpoint::Metrics.path(), get(handlers::metrics::metrics))
        .route(Endpoint::Health.path(), get(handlers::health::health))
        .route(Endpoint::GenerateLoad.path(), get(handlers::load::generate_load))
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn_with_state(observability, instrument_request))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(record_response),
        )
        .layer(propagate_request_id())
        .layer(set_request_id())
}

/// HTTP server for the demo service.
pub struct HttpServer {
    router: Router,
    config: Arc<ServiceConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(
        config: ServiceConfig,
        observability: Arc<Observability>,
    ) -> Result<Self, ServerError> {
        let config = Arc::new(config);
        let state = AppState::new(config.clone(), observability)?;
        let router = build_router(state);
        Ok(Self { router, config })
    }

    /// Router with every layer applied, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            service = %self.config.service.name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
