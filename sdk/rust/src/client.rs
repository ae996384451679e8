use std::collections::BTreeMap;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Directory {
    pub message: String,
    pub endpoints: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: f64,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlowReport {
    pub message: String,
    pub duration: f64,
    pub result: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExternalReport {
    pub message: String,
    pub status_code: u16,
    pub data: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadResult {
    pub operation: usize,
    #[serde(rename = "type")]
    pub kind: String, // "fast", "medium" or "slow"
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadReport {
    pub message: String,
    pub operations: usize,
    pub results: Vec<LoadResult>,
}

/// Typed client for the sample application's demo endpoints.
#[derive(Clone)]
pub struct SampleAppClient {
    client: Client,
    base_url: String,
}

impl SampleAppClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn home(&self) -> Result<Directory, ClientError> {
        self.get_json("/").await
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.get_json("/health").await
    }

    /// Takes 1-3 seconds server side.
    pub async fn slow(&self) -> Result<SlowReport, ClientError> {
        self.get_json("/slow").await
    }

    /// Trigger an error scenario. Simulated failures come back as
    /// [`ClientError::Status`].
    pub async fn error(&self, kind: &str) -> Result<MessageBody, ClientError> {
        let resp = self
            .client
            .get(self.url("/error"))
            .query(&[("type", kind)])
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn external(&self) -> Result<ExternalReport, ClientError> {
        self.get_json("/external").await
    }

    pub async fn generate_load(&self) -> Result<LoadReport, ClientError> {
        self.get_json("/generate-load").await
    }

    /// Raw Prometheus exposition text.
    pub async fn metrics(&self) -> Result<String, ClientError> {
        let resp = self.get("/metrics").await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status { status, body });
        }
        Ok(body)
    }

    /// Perform a GET against any path, without decoding.
    pub async fn get(&self, path: &str) -> Result<Response, reqwest::Error> {
        self.client.get(self.url(path)).send().await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.get(path).await?;
        decode(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await?;
        return Err(ClientError::Status { status, body });
    }
    Ok(resp.json::<T>().await?)
}
