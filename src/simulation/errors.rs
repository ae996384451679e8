//! Error scenarios served by `/error`.

use rand::Rng;

/// Value of `type` that asks for a random scenario.
pub const RANDOM: &str = "random";

/// Outcome simulated by one `/error` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorMode {
    /// HTTP 500.
    InternalError,
    /// HTTP 404.
    NotFound,
    /// Sleep long enough for the caller to give up, then 200.
    Timeout,
    /// No error.
    Success,
}

impl ErrorMode {
    pub const ALL: [ErrorMode; 4] = [
        ErrorMode::InternalError,
        ErrorMode::NotFound,
        ErrorMode::Timeout,
        ErrorMode::Success,
    ];

    /// Resolve the requested `type` query value.
    ///
    /// `random` picks uniformly among all modes; anything unrecognized is
    /// treated as success.
    pub fn resolve<R: Rng>(requested: &str, rng: &mut R) -> Self {
        match requested {
            RANDOM => Self::ALL[rng.gen_range(0..Self::ALL.len())],
            "500" => ErrorMode::InternalError,
            "404" => ErrorMode::NotFound,
            "timeout" => ErrorMode::Timeout,
            _ => ErrorMode::Success,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorMode::InternalError => "500",
            ErrorMode::NotFound => "404",
            ErrorMode::Timeout => "timeout",
            ErrorMode::Success => "success",
        }
    }
}
