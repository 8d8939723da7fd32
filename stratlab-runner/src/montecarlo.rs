//! Monte Carlo equity-path projection.
//!
//! Resamples historical strategy returns with replacement (seeded StdRng)
//! into compounding equity paths over a projection horizon, and reports
//! percentile bands of terminal equity. Resampling the realized return
//! distribution avoids assuming normality while staying deterministic for a
//! given seed. A toy projection, not financial advice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for a Monte Carlo projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Projection horizon in years.
    pub years: usize,
    /// Trading periods per year.
    pub periods_per_year: usize,
    /// Number of simulated paths.
    pub sims: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            years: 5,
            periods_per_year: 252,
            sims: 200,
            seed: 42,
        }
    }
}

/// Errors from projection.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("cannot project from an empty return series")]
    EmptyReturns,

    #[error("projection horizon must cover at least one period")]
    EmptyHorizon,
}

/// Result of a Monte Carlo projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloProjection {
    pub sims: usize,
    pub n_periods: usize,
    pub start_equity: f64,
    /// Terminal equity of every path, sorted ascending.
    pub terminal_equities: Vec<f64>,
    /// 10th percentile of terminal equity.
    pub p10: f64,
    /// Median terminal equity.
    pub p50: f64,
    /// 90th percentile of terminal equity.
    pub p90: f64,
}

impl MonteCarloProjection {
    /// Terminal-equity percentile by linear interpolation, q in [0, 1].
    pub fn percentile(&self, q: f64) -> f64 {
        percentile_of_sorted(&self.terminal_equities, q)
    }
}

/// Project equity paths by resampling historical returns.
pub fn project(
    returns: &[f64],
    start_equity: f64,
    config: &MonteCarloConfig,
) -> Result<MonteCarloProjection, ProjectionError> {
    if returns.is_empty() {
        return Err(ProjectionError::EmptyReturns);
    }
    let n_periods = config.years * config.periods_per_year;
    if n_periods == 0 || config.sims == 0 {
        return Err(ProjectionError::EmptyHorizon);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut terminals = Vec::with_capacity(config.sims);

    for _ in 0..config.sims {
        let mut equity = start_equity;
        for _ in 0..n_periods {
            let r = returns[rng.gen_range(0..returns.len())];
            equity *= 1.0 + r;
        }
        terminals.push(equity);
    }

    terminals.sort_by(f64::total_cmp);

    let p10 = percentile_of_sorted(&terminals, 0.10);
    let p50 = percentile_of_sorted(&terminals, 0.50);
    let p90 = percentile_of_sorted(&terminals, 0.90);

    Ok(MonteCarloProjection {
        sims: config.sims,
        n_periods,
        start_equity,
        terminal_equities: terminals,
        p10,
        p50,
        p90,
    })
}

/// Linear-interpolated percentile of an ascending-sorted slice.
fn percentile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let clamped = q.clamp(0.0, 1.0);
    let rank = clamped * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let weight = rank - lo as f64;
    sorted[lo] * (1.0 - weight) + sorted[hi] * weight
}
