//! Simulated workloads behind the demo endpoints.
//!
//! Randomness is drawn through a caller-supplied `Rng` so handlers can use
//! the thread RNG and tests a seeded one.

pub mod errors;
pub mod load;
pub mod work;

pub use errors::ErrorMode;
pub use load::{LoadPlan, LoadTier, PlannedOperation};
