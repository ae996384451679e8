//! Demo endpoint handlers.
//!
//! Each handler is a thin async function over [`AppState`]; the
//! [`Endpoint`] table is the single source of paths, metric endpoint names
//! and the directory served at `/`.
//!
//! [`AppState`]: crate::http::server::AppState

pub mod errors;
pub mod external;
pub mod health;
pub mod home;
pub mod load;
pub mod metrics;
pub mod slow;

/// Endpoint label for requests that matched no route.
pub const UNKNOWN_ENDPOINT: &str = "unknown";

/// Routed endpoints of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Home,
    Slow,
    Error,
    External,
    Metrics,
    Health,
    GenerateLoad,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Home,
        Endpoint::Slow,
        Endpoint::Error,
        Endpoint::External,
        Endpoint::Metrics,
        Endpoint::Health,
        Endpoint::GenerateLoad,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Home => "/",
            Endpoint::Slow => "/slow",
            Endpoint::Error => "/error",
            Endpoint::External => "/external",
            Endpoint::Metrics => "/metrics",
            Endpoint::Health => "/health",
            Endpoint::GenerateLoad => "/generate-load",
        }
    }

    /// Value of the `endpoint` metric label.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Home => "home",
            Endpoint::Slow => "slow_operation",
            Endpoint::Error => "error_scenario",
            Endpoint::External => "external_call",
            Endpoint::Metrics => "metrics",
            Endpoint::Health => "health",
            Endpoint::GenerateLoad => "generate_load",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Endpoint::Home => "This endpoint",
            Endpoint::Slow => "Simulates slow operation",
            Endpoint::Error => "Simulates error scenarios",
            Endpoint::External => "Makes external API call",
            Endpoint::Metrics => "Prometheus metrics",
            Endpoint::Health => "Health check",
            Endpoint::GenerateLoad => "Generates synthetic load",
        }
    }

    /// Look up a route template.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.path() == path)
    }
}
