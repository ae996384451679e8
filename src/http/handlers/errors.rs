use std::time::Duration;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{field::Empty, Instrument, Span};

use crate::http::response::{ApiError, MessageBody};
use crate::http::server::AppState;
use crate::observability::BusinessOperation;
use crate::simulation::errors::{ErrorMode, RANDOM};

/// How long the timeout scenario stalls before answering.
pub const TIMEOUT_STALL: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
pub struct ErrorQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// `GET /error?type={500|404|timeout|success|random}`
pub async fn error_scenario(
    State(state): State<AppState>,
    Query(query): Query<ErrorQuery>,
) -> Result<Json<MessageBody>, ApiError> {
    let requested = query.kind.unwrap_or_else(|| RANDOM.to_string());
    let mode = ErrorMode::resolve(&requested, &mut rand::thread_rng());
    let span = tracing::info_span!(
        "error_operation",
        "error.type" = %requested,
        error = Empty,
        "error.message" = Empty,
        "operation.timeout" = Empty,
    );

    async move {
        tracing::warn!("Simulating error type: {}", mode.as_str());

        match mode {
            ErrorMode::InternalError => {
                let span = Span::current();
                span.record("error", true);
                span.record("error.message", "Internal server error simulation");
                tracing::error!("Simulated 500 error");
                Err(ApiError::SimulatedInternal)
            }
            ErrorMode::NotFound => {
                let span = Span::current();
                span.record("error", true);
                span.record("error.message", "Resource not found simulation");
                tracing::error!("Simulated 404 error");
                Err(ApiError::SimulatedNotFound)
            }
            ErrorMode::Timeout => {
                Span::current().record("operation.timeout", true);
                tracing::warn!("Simulating timeout");
                tokio::time::sleep(TIMEOUT_STALL).await;
                Ok(Json(MessageBody::new("This shouldn't be reached")))
            }
            ErrorMode::Success => {
                state
                    .observability
                    .metrics()
                    .record_business_operation(BusinessOperation::ErrorHandled);
                tracing::info!("Error scenario handled successfully");
                Ok(Json(MessageBody::new("No error occurred")))
            }
        }
    }
    .instrument(span)
    .await
}
