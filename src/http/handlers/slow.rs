use std::time::Duration;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::http::server::AppState;
use crate::observability::BusinessOperation;
use crate::simulation::work;

#[derive(Debug, Serialize, Deserialize)]
pub struct SlowReport {
    pub message: String,
    /// Seconds slept.
    pub duration: f64,
    pub result: f64,
}

/// `GET /slow`
///
/// Sleeps 1-3 seconds, then burns CPU in a nested span.
pub async fn slow_operation(State(state): State<AppState>) -> Json<SlowReport> {
    let sleep_secs = work::slow_sleep_secs(&mut rand::thread_rng());
    let span = tracing::info_span!(
        "slow_operation",
        "operation.type" = "slow",
        "operation.complexity" = "high",
        "sleep.duration" = sleep_secs,
    );

    async move {
        tracing::info!("Starting slow operation");
        tokio::time::sleep(Duration::from_secs_f64(sleep_secs)).await;

        let result = tracing::info_span!("cpu_intensive_work")
            .in_scope(|| work::accumulate(&mut rand::thread_rng(), work::CPU_ITERATIONS));

        state
            .observability
            .metrics()
            .record_business_operation(BusinessOperation::SlowOperation);
        tracing::info!("Slow operation completed in {:.2} seconds", sleep_secs);

        Json(SlowReport {
            message: "Slow operation completed".to_string(),
            duration: sleep_secs,
            result,
        })
    }
    .instrument(span)
    .await
}
