//! Simulated slow work for `/slow`.

use std::ops::RangeInclusive;

use rand::Rng;

/// Sleep range of one slow operation, in seconds.
pub const SLOW_SLEEP_SECS: RangeInclusive<f64> = 1.0..=3.0;

/// Iterations of the CPU-bound accumulation.
pub const CPU_ITERATIONS: u32 = 100_000;

pub fn slow_sleep_secs<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(SLOW_SLEEP_SECS)
}

/// Sum of `i * u` over `0..iterations`, with `u` uniform in [0, 1).
pub fn accumulate<R: Rng>(rng: &mut R, iterations: u32) -> f64 {
    (0..iterations)
        .map(|i| f64::from(i) * rng.gen::<f64>())
        .sum()
}
