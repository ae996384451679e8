//! Response bodies and handler errors.
//!
//! # Design Decisions
//! - Every body is JSON; errors carry an `error` string and optional
//!   `details`
//! - Handlers return `Result<_, ApiError>` and the error maps itself to a
//!   status code

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `{"message": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{"error": ..., "details": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Handler-level failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Internal server error")]
    SimulatedInternal,

    #[error("Resource not found")]
    SimulatedNotFound,

    #[error("External call failed")]
    ExternalCall(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::SimulatedInternal | ApiError::ExternalCall(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::SimulatedNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();
        let details = match self {
            ApiError::ExternalCall(details) => Some(details),
            _ => None,
        };
        (status, Json(ErrorBody { error, details })).into_response()
    }
}

/// Render an error and its source chain as one line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
