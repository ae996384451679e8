use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

use super::Endpoint;

#[derive(Serialize)]
pub struct Directory {
    pub message: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// `GET /`
pub async fn home() -> Json<Directory> {
    tracing::info!("Home endpoint accessed");
    Json(Directory {
        message: "Welcome to the 4-Signal Observability Demo",
        endpoints: Endpoint::ALL
            .into_iter()
            .map(|e| (e.path(), e.description()))
            .collect(),
    })
}
