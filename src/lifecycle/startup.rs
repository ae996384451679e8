//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the observability context and install logging
//! - Start the profiler
//! - Bind the listener and serve until a shutdown signal
//! - Flush telemetry on the way out
//!
//! # Design Decisions
//! - Subsystems initialize in order, not concurrently
//! - The listener binds last (traffic only when instrumentation is ready)

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, tracing as otel_tracing, Observability, ObservabilityError, Profiler};

/// Fatal startup or serving error.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Observability(#[from] ObservabilityError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
}

/// Run the service with a validated configuration.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    let observability = Arc::new(Observability::new(&config.service, &config.telemetry)?);

    let tracer = config
        .telemetry
        .otlp_enabled
        .then(|| observability.tracer());
    logging::init_subscriber(&config.logging, tracer)?;
    otel_tracing::install_propagator();
    tracing::info!(
        otlp_enabled = config.telemetry.otlp_enabled,
        otlp_endpoint = %config.telemetry.otlp_endpoint,
        sample_ratio = config.telemetry.sample_ratio,
        "Observability initialized"
    );

    tracing::info!(
        service = %config.service.name,
        version = %config.service.version,
        environment = %config.service.environment,
        "Starting sample application with 4-signal observability"
    );

    let profiler = Profiler::start(&config.profiling, &config.service)?;

    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, observability.clone())?;
    let server_shutdown = shutdown.subscribe();

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    let served = server.run(listener, server_shutdown).await;

    profiler.stop();
    observability.shutdown();
    tracing::info!("Shutdown complete");

    served.map_err(StartupError::from)
}
