//! Performance metrics — pure functions over return/equity series and the
//! trade log.
//!
//! Every metric is a pure function: series in, scalar out. Empty and
//! degenerate inputs (zero-variance denominators, too few observations)
//! recover locally to 0.0 — metrics never raise. The one deliberate
//! non-finite value is `profit_factor`, which is +inf when there are gains
//! and no losses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stratlab_core::domain::{Ledger, Trade};

/// Trading periods per year for annualization of daily series.
pub const PERIODS_PER_YEAR: f64 = 252.0;

/// Aggregate performance metrics for a single backtest run.
///
/// Strategy and buy-and-hold benchmark statistics side by side, plus the
/// trade-log statistics. `as_map` flattens to a name -> scalar mapping for
/// presentation layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_return: f64,
    pub cagr: f64,
    pub sharpe: f64,
    pub sortino: f64,
    pub volatility: f64,
    pub max_drawdown: f64,
    pub final_equity: f64,
    pub benchmark_sharpe: f64,
    pub benchmark_cagr: f64,
    pub benchmark_max_drawdown: f64,
    pub final_benchmark_equity: f64,
    pub trade_count: usize,
    pub win_rate: f64,
    pub profit_factor: f64,
}

impl PerformanceMetrics {
    /// Compute all metrics from a simulated ledger and its trade log.
    pub fn compute(ledger: &Ledger, trades: &[Trade]) -> Self {
        let returns = ledger.strategy_returns();
        let equity = ledger.equity_curve();
        let benchmark_returns = ledger.benchmark_returns();
        let benchmark = ledger.benchmark_curve();

        Self {
            total_return: total_return(&equity),
            cagr: cagr(&equity, PERIODS_PER_YEAR),
            sharpe: sharpe(&returns, 0.0, PERIODS_PER_YEAR),
            sortino: sortino(&returns, 0.0, PERIODS_PER_YEAR),
            volatility: volatility(&returns, PERIODS_PER_YEAR),
            max_drawdown: max_drawdown(&equity),
            final_equity: ledger.final_equity().unwrap_or(0.0),
            benchmark_sharpe: sharpe(&benchmark_returns, 0.0, PERIODS_PER_YEAR),
            benchmark_cagr: cagr(&benchmark, PERIODS_PER_YEAR),
            benchmark_max_drawdown: max_drawdown(&benchmark),
            final_benchmark_equity: ledger.final_benchmark_equity().unwrap_or(0.0),
            trade_count: trades.len(),
            win_rate: win_rate(trades),
            profit_factor: profit_factor(trades),
        }
    }

    /// Flatten to a metric-name -> scalar mapping.
    pub fn as_map(&self) -> BTreeMap<String, f64> {
        let mut map = BTreeMap::new();
        map.insert("total_return".into(), self.total_return);
        map.insert("cagr".into(), self.cagr);
        map.insert("sharpe".into(), self.sharpe);
        map.insert("sortino".into(), self.sortino);
        map.insert("volatility".into(), self.volatility);
        map.insert("max_drawdown".into(), self.max_drawdown);
        map.insert("final_equity".into(), self.final_equity);
        map.insert("benchmark_sharpe".into(), self.benchmark_sharpe);
        map.insert("benchmark_cagr".into(), self.benchmark_cagr);
        map.insert(
            "benchmark_max_drawdown".into(),
            self.benchmark_max_drawdown,
        );
        map.insert(
            "final_benchmark_equity".into(),
            self.final_benchmark_equity,
        );
        map.insert("trade_count".into(), self.trade_count as f64);
        map.insert("win_rate".into(), self.win_rate);
        map.insert("profit_factor".into(), self.profit_factor);
        map
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Total return as a fraction: last/first - 1. 0.0 for degenerate input.
pub fn total_return(equity: &[f64]) -> f64 {
    match (equity.first(), equity.last()) {
        (Some(&first), Some(&last)) if first > 0.0 => last / first - 1.0,
        _ => 0.0,
    }
}

/// Annualized Sharpe ratio: sqrt(ppy) * mean(excess) / std(excess).
///
/// Excess subtracts the per-period risk-free rate. 0.0 when the standard
/// deviation is zero or undefined (fewer than 2 observations).
pub fn sharpe(returns: &[f64], risk_free_rate: f64, periods_per_year: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let per_period_rf = risk_free_rate / periods_per_year;
    let excess: Vec<f64> = returns.iter().map(|r| r - per_period_rf).collect();
    let std = sample_std(&excess);
    if std == 0.0 || std.is_nan() {
        return 0.0;
    }
    periods_per_year.sqrt() * mean(&excess) / std
}

/// Annualized Sortino ratio — the denominator is the standard deviation of
/// only the negative excess returns. 0.0 when that deviation is
/// zero/undefined (no downside, or a single downside observation).
pub fn sortino(returns: &[f64], risk_free_rate: f64, periods_per_year: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let per_period_rf = risk_free_rate / periods_per_year;
    let excess: Vec<f64> = returns.iter().map(|r| r - per_period_rf).collect();
    let downside: Vec<f64> = excess.iter().copied().filter(|r| *r < 0.0).collect();
    let downside_std = sample_std(&downside);
    if downside_std == 0.0 || downside_std.is_nan() {
        return 0.0;
    }
    periods_per_year.sqrt() * mean(&excess) / downside_std
}

/// Maximum drawdown: min over t of equity[t]/running-max[t] - 1.
///
/// Always <= 0; exactly 0.0 for a monotonically non-decreasing curve and
/// for empty input.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;
    for &eq in equity {
        if eq > peak {
            peak = eq;
        }
        let dd = eq / peak - 1.0;
        if dd < max_dd {
            max_dd = dd;
        }
    }
    max_dd
}

/// Compound annual growth rate: (last/first)^(ppy/len) - 1.
///
/// 0.0 for empty input, a non-positive span, or non-positive endpoints.
pub fn cagr(equity: &[f64], periods_per_year: f64) -> f64 {
    if equity.is_empty() {
        return 0.0;
    }
    let first = equity[0];
    let last = *equity.last().unwrap();
    let years = equity.len() as f64 / periods_per_year;
    if years <= 0.0 || first <= 0.0 || last <= 0.0 {
        return 0.0;
    }
    (last / first).powf(1.0 / years) - 1.0
}

/// Annualized volatility: std(returns) * sqrt(ppy). 0.0 when undefined.
pub fn volatility(returns: &[f64], periods_per_year: f64) -> f64 {
    let std = sample_std(returns);
    if std.is_nan() {
        return 0.0;
    }
    std * periods_per_year.sqrt()
}

/// Win rate: fraction of trades with positive pnl. 0.0 with no trades.
pub fn win_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let wins = trades.iter().filter(|t| t.pnl > 0.0).count();
    wins as f64 / trades.len() as f64
}

/// Profit factor: gross gains / |gross losses|.
///
/// +inf when there are gains and zero losses; 0.0 when there are neither.
pub fn profit_factor(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let gains: f64 = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
    let losses: f64 = trades.iter().filter(|t| t.pnl < 0.0).map(|t| t.pnl).sum();

    if losses == 0.0 {
        return if gains > 0.0 { f64::INFINITY } else { 0.0 };
    }
    gains / losses.abs()
}

// ─── Helpers ────────────────────────────────────────────────────────

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (N-1 divisor); NaN for fewer than 2 values.
pub(crate) fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
