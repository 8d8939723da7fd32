//! StratLab Runner — backtest orchestration above the core engine.
//!
//! This crate builds on `stratlab-core` to provide:
//! - Performance metrics over return/equity series and trade logs
//! - Serializable run configuration with content-hash run IDs
//! - The single-backtest runner (fetch, simulate, measure)
//! - The study comparator (all strategies on one ticker, rayon-parallel)
//! - The Monte Carlo equity-path projection

pub mod config;
pub mod metrics;
pub mod montecarlo;
pub mod runner;
pub mod study;

pub use config::{BacktestConfig, ConfigError, RunId, StrategyConfig};
pub use metrics::{PerformanceMetrics, PERIODS_PER_YEAR};
pub use montecarlo::{project, MonteCarloConfig, MonteCarloProjection, ProjectionError};
pub use runner::{run_backtest_from_bars, run_single_backtest, BacktestReport, RunError};
pub use study::{evaluate_strategies, rank_strategies, RiskFocus, StudyEntry};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn performance_metrics_is_send_sync() {
        assert_send::<PerformanceMetrics>();
        assert_sync::<PerformanceMetrics>();
    }

    #[test]
    fn report_and_config_are_send_sync() {
        assert_send::<BacktestReport>();
        assert_sync::<BacktestReport>();
        assert_send::<BacktestConfig>();
        assert_sync::<BacktestConfig>();
    }

    #[test]
    fn study_types_are_send_sync() {
        assert_send::<StudyEntry>();
        assert_sync::<StudyEntry>();
        assert_send::<RiskFocus>();
        assert_sync::<RiskFocus>();
    }

    #[test]
    fn montecarlo_types_are_send_sync() {
        assert_send::<MonteCarloConfig>();
        assert_sync::<MonteCarloConfig>();
        assert_send::<MonteCarloProjection>();
        assert_sync::<MonteCarloProjection>();
    }
}
