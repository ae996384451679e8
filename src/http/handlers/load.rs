use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::http::server::AppState;
use crate::simulation::{LoadPlan, LoadTier};

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadResult {
    pub operation: usize,
    #[serde(rename = "type")]
    pub kind: LoadTier,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadReport {
    pub message: String,
    pub operations: usize,
    pub results: Vec<LoadResult>,
}

/// `GET /generate-load`
///
/// Runs 10-50 synthetic operations back to back, one span each.
pub async fn generate_load(State(state): State<AppState>) -> Json<LoadReport> {
    let plan = LoadPlan::generate(&mut rand::thread_rng());
    let span = tracing::info_span!("load_generation", "load.operations" = plan.len());

    async move {
        tracing::info!("Generating load with {} operations", plan.len());
        let metrics = state.observability.metrics();
        let mut results = Vec::with_capacity(plan.len());

        for op in plan.operations() {
            let op_span = tracing::info_span!(
                "load_operation",
                otel.name = %format!("operation_{}", op.index),
                "operation.index" = op.index,
                "operation.type" = op.tier.as_str(),
            );
            tokio::time::sleep(op.delay).instrument(op_span).await;

            metrics.record_business_operation(op.tier.business_operation());
            results.push(LoadResult {
                operation: op.index,
                kind: op.tier,
            });
        }

        tracing::info!("Load generation completed: {} operations", plan.len());
        Json(LoadReport {
            message: "Load generation completed".to_string(),
            operations: plan.len(),
            results,
        })
    }
    .instrument(span)
    .await
}
