//! Request middleware.

pub mod instrumentation;

pub use instrumentation::{instrument_request, RequestTiming, CLIENT_CLOSED_REQUEST};
