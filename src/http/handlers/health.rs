use std::time::{SystemTime, UNIX_EPOCH};

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    pub service: String,
    pub version: String,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    tracing::info!("Health check requested");
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();

    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp,
        service: state.config.service.name.clone(),
        version: state.config.service.version.clone(),
    })
}
