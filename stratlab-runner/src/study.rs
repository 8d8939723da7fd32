//! Study comparison — every strategy variant against one ticker's series.
//!
//! Runs are independent and embarrassingly parallel, so they fan out with
//! rayon. The input series is immutable and shared read-only; each run
//! builds its own derived series. Ranking uses a composite risk/return
//! score with three risk-focus profiles.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use stratlab_core::domain::Bar;
use stratlab_core::strategies::StrategySpec;

use crate::metrics::PerformanceMetrics;
use crate::runner::{run_backtest_from_bars, RunError};

/// Which side of the risk/return trade-off a ranking favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFocus {
    /// Weight performance: sharpe 0.7, relative final equity 0.3.
    Return,
    /// Weight capital preservation: sharpe 0.5, drawdown 0.5.
    Defensive,
    /// Middle ground: sharpe 0.5, drawdown 0.3, relative final equity 0.2.
    Balanced,
}

/// One strategy's results within a study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyEntry {
    pub strategy: StrategySpec,
    pub metrics: PerformanceMetrics,
    /// Composite ranking score; 0 until `rank_strategies` assigns it.
    pub score: f64,
}

/// Run every default strategy variant over the same bar series.
///
/// Entries come back in registry order; feed them to `rank_strategies` for
/// a sorted leaderboard. Any run failure aborts the study — partial study
/// tables are worse than none.
pub fn evaluate_strategies(
    bars: &[Bar],
    initial_capital: f64,
) -> Result<Vec<StudyEntry>, RunError> {
    StrategySpec::all_defaults()
        .into_par_iter()
        .map(|spec| {
            let report = run_backtest_from_bars(bars, &spec, initial_capital)?;
            Ok(StudyEntry {
                strategy: spec,
                metrics: report.metrics,
                score: 0.0,
            })
        })
        .collect()
}

/// Score and sort study entries, best first.
pub fn rank_strategies(mut entries: Vec<StudyEntry>, focus: RiskFocus) -> Vec<StudyEntry> {
    if entries.is_empty() {
        return entries;
    }

    let mean_final_equity = entries
        .iter()
        .map(|e| e.metrics.final_equity)
        .sum::<f64>()
        / entries.len() as f64;

    for entry in &mut entries {
        let sharpe = entry.metrics.sharpe;
        let drawdown = entry.metrics.max_drawdown;
        let relative_equity = if mean_final_equity > 0.0 {
            entry.metrics.final_equity / mean_final_equity
        } else {
            0.0
        };

        // Drawdown is negative, so -drawdown rewards shallow curves.
        entry.score = match focus {
            RiskFocus::Return => sharpe * 0.7 + relative_equity * 0.3,
            RiskFocus::Defensive => sharpe * 0.5 + (-drawdown) * 0.5,
            RiskFocus::Balanced => {
                sharpe * 0.5 + (-drawdown) * 0.3 + relative_equity * 0.2
            }
        };
    }

    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    entries
}
