//! Random number source
//!
//! Handlers draw through [`RandomSource`] so tests can pin the extremes of
//! the range instead of sampling until they happen to hit them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Source of uniformly distributed values in `[0.0, 1.0)`
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    fn next_f64(&self) -> f64;
}

/// Production source backed by `rand::thread_rng()`
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&self) -> f64 {
        rand::thread_rng().r#gen::<f64>()
    }
}

/// Reproducible source for replays and demos
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&self) -> f64 {
        // A poisoned lock still holds a usable generator
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        rng.r#gen::<f64>()
    }
}

/// Fixed value, for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_f64(&self) -> f64 {
        self.0
    }
}

/// Map a draw in `[0.0, 1.0)` onto the inclusive range `[lower, upper]`
///
/// Computes `floor(r * (upper - lower + 1)) + lower` in 128-bit space and
/// clamps, so neither float rounding nor a full-width `i64` span can escape
/// the range. An inverted pair is drawn from as if it were ordered.
pub fn pick_in_range(r: f64, lower: i64, upper: i64) -> i64 {
    let (lower, upper) = (i128::from(lower.min(upper)), i128::from(lower.max(upper)));
    let span = (upper - lower + 1) as f64;
    let offset = (r.clamp(0.0, 1.0) * span).floor() as i128;
    let value = (lower + offset).clamp(lower, upper);
    // Clamped into [lower, upper], both of which came from i64
    i64::try_from(value).unwrap_or_default()
}
