//! Backtest orchestrator — wires a price series, a strategy, and initial
//! capital into one simulation run.
//!
//! Stateless facade over the strategy factory and the portfolio simulator:
//! any failure propagates immediately, there are no retries and no partial
//! results. The returned artifacts are handed to the caller untouched; the
//! metric layer computes statistics from them separately.

use thiserror::Error;

use crate::domain::{Bar, Ledger, Trade};
use crate::portfolio::{Portfolio, SimulationError};
use crate::strategies::{StrategyError, StrategySpec};

/// Errors from a backtest run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("simulation error: {0}")]
    Simulation(#[from] SimulationError),
}

/// Combined artifact of one backtest run.
#[derive(Debug, Clone)]
pub struct BacktestRun {
    pub ledger: Ledger,
    pub trades: Vec<Trade>,
}

/// One-shot backtest engine.
#[derive(Debug, Clone, Copy)]
pub struct BacktestEngine {
    initial_capital: f64,
}

impl BacktestEngine {
    pub fn new(initial_capital: f64) -> Self {
        Self { initial_capital }
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    /// Run the strategy over the bars and return the ledger and trade log.
    pub fn run(&self, bars: &[Bar], spec: &StrategySpec) -> Result<BacktestRun, EngineError> {
        let generator = spec.build();
        let signals = generator.generate(bars);

        let mut portfolio = Portfolio::new(self.initial_capital);
        portfolio.run(bars, &signals)?;
        let trades = portfolio.trades()?;
        let ledger = portfolio
            .into_ledger()
            .expect("ledger exists after a successful run");

        Ok(BacktestRun { ledger, trades })
    }
}
