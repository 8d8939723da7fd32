//! Portfolio simulation — turns a signal series into realized performance.
//!
//! The simulator applies the one-bar lag rule (a signal computed on bar t is
//! acted on at bar t+1), compounds strategy returns into an equity curve,
//! and carries a buy-and-hold benchmark alongside. Trade extraction derives
//! discrete round trips from the simulated position series after the run.

mod trades;

pub(crate) use trades::extract_trades;

use thiserror::Error;

use crate::domain::{Bar, Ledger, LedgerRow, Trade};

/// Errors from portfolio simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("cannot simulate an empty price series")]
    EmptySeries,

    #[error("signal series length {signals} does not match bar series length {bars}")]
    LengthMismatch { bars: usize, signals: usize },

    #[error("portfolio has not been simulated yet — call run() before trades()")]
    PrecedingStateRequired,
}

/// One-asset portfolio simulator.
///
/// `run` owns the ledger while it is being built and exposes it as an
/// immutable result afterwards. The input series is never mutated; every
/// stage derives its own output.
#[derive(Debug)]
pub struct Portfolio {
    initial_capital: f64,
    ledger: Option<Ledger>,
}

impl Portfolio {
    pub fn new(initial_capital: f64) -> Self {
        assert!(
            initial_capital > 0.0 && initial_capital.is_finite(),
            "initial capital must be positive and finite"
        );
        Self {
            initial_capital,
            ledger: None,
        }
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    /// Simulate the signal series over the bars and build the ledger.
    ///
    /// The position held on bar t is the signal from bar t-1; the first
    /// bar's position is always 0.
    pub fn run(&mut self, bars: &[Bar], signals: &[i8]) -> Result<&Ledger, SimulationError> {
        if bars.is_empty() {
            return Err(SimulationError::EmptySeries);
        }
        if bars.len() != signals.len() {
            return Err(SimulationError::LengthMismatch {
                bars: bars.len(),
                signals: signals.len(),
            });
        }

        let shares = self.initial_capital / bars[0].close;
        let mut equity = self.initial_capital;
        let mut prev_benchmark = shares * bars[0].close;

        let mut rows = Vec::with_capacity(bars.len());
        for (t, bar) in bars.iter().enumerate() {
            let position = if t == 0 { 0 } else { signals[t - 1] };
            let asset_return = if t == 0 {
                0.0
            } else {
                bar.close / bars[t - 1].close - 1.0
            };
            let strategy_return = f64::from(position) * asset_return;
            equity *= 1.0 + strategy_return;

            let benchmark_equity = shares * bar.close;
            let benchmark_return = if t == 0 {
                0.0
            } else {
                benchmark_equity / prev_benchmark - 1.0
            };
            prev_benchmark = benchmark_equity;

            rows.push(LedgerRow {
                date: bar.date,
                close: bar.close,
                position,
                asset_return,
                strategy_return,
                equity,
                benchmark_equity,
                benchmark_return,
            });
        }

        self.ledger = Some(Ledger::from_rows(rows));
        Ok(self.ledger.as_ref().unwrap())
    }

    /// The ledger from the last `run`, if any.
    pub fn ledger(&self) -> Option<&Ledger> {
        self.ledger.as_ref()
    }

    /// Derive the round-trip trade log from the simulated position series.
    pub fn trades(&self) -> Result<Vec<Trade>, SimulationError> {
        let ledger = self
            .ledger
            .as_ref()
            .ok_or(SimulationError::PrecedingStateRequired)?;
        Ok(extract_trades(ledger.rows(), self.initial_capital))
    }

    /// Consume the simulator, handing the ledger to the caller.
    pub fn into_ledger(self) -> Option<Ledger> {
        self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradeDirection;
    use crate::strategies::make_bars;

    fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
        assert!(
            (actual - expected).abs() < epsilon,
            "actual={actual}, expected={expected}"
        );
    }

    #[test]
    fn five_bar_scenario() {
        // Closes [100,102,101,105,110] with pre-lag signals [1,1,0,0,1]:
        // positions [0,1,1,0,0], equity 10000, 10200, 10100, 10100, 10100,
        // one long trade 102 -> 105.
        let bars = make_bars(&[100.0, 102.0, 101.0, 105.0, 110.0]);
        let signals = vec![1, 1, 0, 0, 1];

        let mut portfolio = Portfolio::new(10_000.0);
        let ledger = portfolio.run(&bars, &signals).unwrap();

        assert_eq!(ledger.positions(), vec![0, 1, 1, 0, 0]);

        let equity = ledger.equity_curve();
        let expected = [10_000.0, 10_200.0, 10_100.0, 10_100.0, 10_100.0];
        for (e, x) in equity.iter().zip(expected) {
            assert_approx(*e, x, 1e-6);
        }

        let returns = ledger.strategy_returns();
        assert_approx(returns[0], 0.0, 1e-12);
        assert_approx(returns[1], 0.02, 1e-12);
        assert_approx(returns[2], 101.0 / 102.0 - 1.0, 1e-12);
        assert_approx(returns[3], 0.0, 1e-12);
        assert_approx(returns[4], 0.0, 1e-12);

        let trades = portfolio.trades().unwrap();
        assert_eq!(trades.len(), 1);
        let trade = &trades[0];
        assert_eq!(trade.direction, TradeDirection::Long);
        assert_eq!(trade.entry_date, bars[1].date);
        assert_eq!(trade.exit_date, bars[3].date);
        assert_approx(trade.entry_price, 102.0, 1e-12);
        assert_approx(trade.exit_price, 105.0, 1e-12);
        assert_approx(trade.return_pct, 105.0 / 102.0 - 1.0, 1e-12);
        assert_approx(trade.pnl, (105.0 / 102.0 - 1.0) * 10_000.0, 1e-9);
    }

    #[test]
    fn benchmark_is_buy_and_hold() {
        let bars = make_bars(&[100.0, 102.0, 101.0, 105.0, 110.0]);
        let signals = vec![0; 5];

        let mut portfolio = Portfolio::new(10_000.0);
        let ledger = portfolio.run(&bars, &signals).unwrap();

        let benchmark = ledger.benchmark_curve();
        let expected = [10_000.0, 10_200.0, 10_100.0, 10_500.0, 11_000.0];
        for (b, x) in benchmark.iter().zip(expected) {
            assert_approx(*b, x, 1e-9);
        }
        assert_approx(ledger.benchmark_returns()[1], 0.02, 1e-12);
        assert_approx(ledger.benchmark_returns()[0], 0.0, 1e-12);
    }

    #[test]
    fn constant_return_compounds_geometrically() {
        // 1% per bar, always long: equity[t] = capital * 1.01^t.
        let closes: Vec<f64> = (0..10).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let bars = make_bars(&closes);
        let signals = vec![1; bars.len()];

        let mut portfolio = Portfolio::new(10_000.0);
        let ledger = portfolio.run(&bars, &signals).unwrap();
        let equity = ledger.equity_curve();

        // Position lags one bar, so compounding starts at t=1.
        for (t, e) in equity.iter().enumerate() {
            let periods = t.saturating_sub(1) as i32;
            assert_approx(*e, 10_000.0 * 1.01_f64.powi(periods), 1e-6);
        }
    }

    #[test]
    fn first_position_is_always_flat() {
        let bars = make_bars(&[100.0, 101.0]);
        let mut portfolio = Portfolio::new(10_000.0);
        let ledger = portfolio.run(&bars, &[1, 1]).unwrap();
        assert_eq!(ledger.rows()[0].position, 0);
        assert_eq!(ledger.rows()[0].asset_return, 0.0);
        assert_eq!(ledger.rows()[0].equity, 10_000.0);
    }

    #[test]
    fn lag_rule_holds_everywhere() {
        let bars = make_bars(&[100.0, 101.0, 99.0, 102.0, 103.0, 98.0]);
        let signals = vec![1, 0, 1, 1, 0, 1];
        let mut portfolio = Portfolio::new(10_000.0);
        let ledger = portfolio.run(&bars, &signals).unwrap();
        for t in 1..bars.len() {
            assert_eq!(ledger.rows()[t].position, signals[t - 1]);
        }
    }

    #[test]
    fn empty_series_is_rejected() {
        let mut portfolio = Portfolio::new(10_000.0);
        assert!(matches!(
            portfolio.run(&[], &[]),
            Err(SimulationError::EmptySeries)
        ));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let bars = make_bars(&[100.0, 101.0]);
        let mut portfolio = Portfolio::new(10_000.0);
        assert!(matches!(
            portfolio.run(&bars, &[1]),
            Err(SimulationError::LengthMismatch { bars: 2, signals: 1 })
        ));
    }

    #[test]
    fn trades_before_run_is_a_usage_error() {
        let portfolio = Portfolio::new(10_000.0);
        assert!(matches!(
            portfolio.trades(),
            Err(SimulationError::PrecedingStateRequired)
        ));
    }

    #[test]
    fn single_bar_produces_no_trades() {
        let bars = make_bars(&[100.0]);
        let mut portfolio = Portfolio::new(10_000.0);
        portfolio.run(&bars, &[1]).unwrap();
        assert!(portfolio.trades().unwrap().is_empty());
    }

    #[test]
    #[should_panic(expected = "initial capital must be positive and finite")]
    fn rejects_nonpositive_capital() {
        Portfolio::new(0.0);
    }
}
