//! Request instrumentation middleware.
//!
//! Wraps every routed request (and the fallback) so that each one is
//! counted exactly once:
//! - normal and error responses are recorded with their status
//! - panics and timeouts are turned into responses by inner layers, so they
//!   are recorded like any other response
//! - a request whose future is dropped (client went away) is recorded with
//!   status 499 by [`RequestTiming`]'s `Drop`

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tokio::time::Instant;

use crate::http::handlers::{Endpoint, UNKNOWN_ENDPOINT};
use crate::observability::Observability;

/// Non-standard status recorded for requests abandoned by the client.
pub const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Timing guard for one in-flight request.
pub struct RequestTiming {
    observability: Arc<Observability>,
    method: String,
    endpoint: &'static str,
    started: Instant,
    recorded: bool,
}

impl RequestTiming {
    /// Start timing `request`.
    pub fn begin(observability: Arc<Observability>, request: &Request) -> Self {
        let endpoint = request
            .extensions()
            .get::<MatchedPath>()
            .and_then(|path| Endpoint::from_path(path.as_str()))
            .map_or(UNKNOWN_ENDPOINT, Endpoint::name);

        Self {
            observability,
            method: request.method().to_string(),
            endpoint,
            started: Instant::now(),
            recorded: false,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    /// Record the outcome and consume the guard.
    pub fn finish(mut self, status: StatusCode) {
        self.record(status.as_u16());
    }

    fn record(&mut self, status: u16) {
        if self.recorded {
            return;
        }
        self.recorded = true;
        self.observability.metrics().record_request(
            &self.method,
            self.endpoint,
            status,
            self.started.elapsed(),
        );
    }
}

impl Drop for RequestTiming {
    fn drop(&mut self) {
        if !self.recorded {
            tracing::debug!(
                method = %self.method,
                endpoint = self.endpoint,
                "Request dropped before completion"
            );
            self.record(CLIENT_CLOSED_REQUEST);
        }
    }
}

/// Middleware entry point, installed with `from_fn_with_state`.
pub async fn instrument_request(
    State(observability): State<Arc<Observability>>,
    request: Request,
    next: Next,
) -> Response {
    let timing = RequestTiming::begin(observability, &request);
    let response = next.run(request).await;
    timing.finish(response.status());
    response
}
