//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layer stack)
//!     → request.rs (assign / echo x-request-id)
//!     → observability::tracing (request span, parent from traceparent)
//!     → middleware/instrumentation.rs (begin timing)
//!     → handlers/* (demo endpoint)
//!     → response.rs (JSON bodies, error mapping)
//!     → middleware/instrumentation.rs (record count + duration)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use handlers::Endpoint;
pub use response::ApiError;
pub use server::{build_router, AppState, HttpServer, ServerError};
