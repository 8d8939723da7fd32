//! Backtest runner — wires data loading, the engine, and metrics.
//!
//! Two entry points:
//! - `run_single_backtest()`: fetches bars from a provider, then runs.
//!   Used by the CLI.
//! - `run_backtest_from_bars()`: takes pre-loaded bars. Used by the study
//!   comparator and the Monte Carlo front end to avoid refetching.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stratlab_core::data::{DataError, DataProvider};
use stratlab_core::domain::{Bar, Ledger, Trade};
use stratlab_core::engine::{BacktestEngine, EngineError};
use stratlab_core::strategies::{StrategyError, StrategySpec};

use crate::config::{BacktestConfig, ConfigError, RunId};
use crate::metrics::PerformanceMetrics;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Complete result of a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub run_id: RunId,
    pub ticker: String,
    pub period: String,
    pub initial_capital: f64,
    pub strategy: StrategySpec,
    pub start_date: String,
    pub end_date: String,
    pub bar_count: usize,
    pub metrics: PerformanceMetrics,
    pub trades: Vec<Trade>,
    pub ledger: Ledger,
}

/// Run a single backtest from a config, fetching bars from `provider`.
pub fn run_single_backtest(
    config: &BacktestConfig,
    provider: &dyn DataProvider,
) -> Result<BacktestReport, RunError> {
    config.validate()?;
    let spec = config.strategy_spec()?;
    let bars = provider.fetch(&config.ticker, &config.period, &config.interval)?;

    let mut report = run_backtest_from_bars(&bars, &spec, config.initial_capital)?;
    report.run_id = config.run_id();
    report.ticker = config.ticker.clone();
    report.period = config.period.clone();
    Ok(report)
}

/// Run a backtest over pre-loaded bars — no I/O.
pub fn run_backtest_from_bars(
    bars: &[Bar],
    spec: &StrategySpec,
    initial_capital: f64,
) -> Result<BacktestReport, RunError> {
    let run = BacktestEngine::new(initial_capital).run(bars, spec)?;
    let metrics = PerformanceMetrics::compute(&run.ledger, &run.trades);

    let start_date = run
        .ledger
        .rows()
        .first()
        .map(|r| r.date.to_string())
        .unwrap_or_default();
    let end_date = run
        .ledger
        .rows()
        .last()
        .map(|r| r.date.to_string())
        .unwrap_or_default();

    Ok(BacktestReport {
        run_id: RunId::new(),
        ticker: String::new(),
        period: String::new(),
        initial_capital,
        strategy: spec.clone(),
        start_date,
        end_date,
        bar_count: run.ledger.len(),
        metrics,
        trades: run.trades,
        ledger: run.ledger,
    })
}
