use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{field::Empty, Instrument, Span};
use url::Url;

use crate::http::response::{error_chain, ApiError};
use crate::http::server::AppState;
use crate::observability::tracing::inject_current_context;
use crate::observability::BusinessOperation;

#[derive(Debug, Serialize, Deserialize)]
pub struct ExternalReport {
    pub message: String,
    pub status_code: u16,
    pub data: Value,
}

/// `GET /external`
///
/// Calls the configured upstream once, propagating the trace context.
/// Any transport, timeout or body decoding failure is reported as a 500.
pub async fn external_call(
    State(state): State<AppState>,
) -> Result<Json<ExternalReport>, ApiError> {
    let url = state.config.external.url.clone();
    let service = Url::parse(&url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_default();
    let span = tracing::info_span!(
        "external_api_call",
        "external.service" = %service,
        "http.status_code" = Empty,
        "external.success" = Empty,
        error = Empty,
        "error.message" = Empty,
    );

    async move {
        tracing::info!("Making external API call");
        let metrics = state.observability.metrics();

        match fetch(&state.client, &url).await {
            Ok((status_code, data)) => {
                let span = Span::current();
                span.record("http.status_code", status_code);
                span.record("external.success", true);
                metrics.record_business_operation(BusinessOperation::ExternalCallSuccess);
                tracing::info!(status_code, "External API call successful");

                Ok(Json(ExternalReport {
                    message: "External call successful".to_string(),
                    status_code,
                    data,
                }))
            }
            Err(e) => {
                let details = error_chain(&e);
                let span = Span::current();
                span.record("error", true);
                span.record("error.message", details.as_str());
                metrics.record_business_operation(BusinessOperation::ExternalCallFailure);
                tracing::error!("External API call failed: {}", details);

                Err(ApiError::ExternalCall(details))
            }
        }
    }
    .instrument(span)
    .await
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<(u16, Value), reqwest::Error> {
    let mut headers = HeaderMap::new();
    inject_current_context(&mut headers);

    let response = client.get(url).headers(headers).send().await?;
    let status_code = response.status().as_u16();
    let data = response.json::<Value>().await?;
    Ok((status_code, data))
}
