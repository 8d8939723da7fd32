//! Rolling indicator primitives used by the signal strategies.
//!
//! Each indicator implements the `Indicator` trait: a pure transform from a
//! close-price slice to an equal-length value series, with NaN marking bars
//! where the lookback window has not yet filled. Strategies compare these
//! series per bar; NaN comparisons are false on both sides, which is what
//! resolves undefined leading values to a flat signal.

pub mod bollinger;
pub mod ema;
pub mod rsi;
pub mod sma;

pub use bollinger::{Bollinger, BollingerBand};
pub use ema::{ema_of_series, Ema};
pub use rsi::Rsi;
pub use sma::Sma;

/// A precomputable single-series indicator over close prices.
pub trait Indicator {
    /// Stable name, parameterized (e.g. `sma_20`).
    fn name(&self) -> &str;

    /// Number of leading bars that evaluate to NaN.
    fn lookback(&self) -> usize;

    /// Compute the full value series; output length equals input length.
    fn compute(&self, closes: &[f64]) -> Vec<f64>;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
