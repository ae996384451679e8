//! Sample service instrumented with four observability signals.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod simulation;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::Observability;
