//! Prometheus scrape endpoint.

use axum::{extract::State, http::header, response::IntoResponse};

use crate::http::server::AppState;
use crate::observability::metrics::PROMETHEUS_CONTENT_TYPE;

/// `GET /metrics`
///
/// ```text
/// # HELP http_requests_total Total HTTP requests
/// # TYPE http_requests_total counter
/// http_requests_total{method="GET",endpoint="health",status="200"} 42
/// ```
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.observability.metrics().render(),
    )
}
