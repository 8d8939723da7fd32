//! Ledger — the per-bar results table produced by the portfolio simulator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the simulation results, aligned 1:1 with the input bar series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub close: f64,
    /// Position actually held on this bar: the previous bar's signal.
    pub position: i8,
    /// Bar-over-bar return of the asset close; 0 on the first bar.
    pub asset_return: f64,
    /// `position * asset_return`.
    pub strategy_return: f64,
    /// Compounding strategy equity, seeded from initial capital.
    pub equity: f64,
    /// Buy-and-hold equity: full capital bought at the first close, held.
    pub benchmark_equity: f64,
    /// Bar-over-bar return of the benchmark equity; 0 on the first bar.
    pub benchmark_return: f64,
}

/// Ordered simulation results, one row per input bar.
///
/// Built once by the portfolio simulator and immutable afterwards. Column
/// accessors materialize owned vectors so callers can feed the metric
/// functions without borrowing into row internals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    rows: Vec<LedgerRow>,
}

impl Ledger {
    pub(crate) fn from_rows(rows: Vec<LedgerRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn equity_curve(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.equity).collect()
    }

    pub fn strategy_returns(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.strategy_return).collect()
    }

    pub fn benchmark_curve(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.benchmark_equity).collect()
    }

    pub fn benchmark_returns(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.benchmark_return).collect()
    }

    pub fn positions(&self) -> Vec<i8> {
        self.rows.iter().map(|r| r.position).collect()
    }

    pub fn final_equity(&self) -> Option<f64> {
        self.rows.last().map(|r| r.equity)
    }

    pub fn final_benchmark_equity(&self) -> Option<f64> {
        self.rows.last().map(|r| r.benchmark_equity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_ledger(n: usize) -> Ledger {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let rows = (0..n)
            .map(|i| LedgerRow {
                date: base + chrono::Duration::days(i as i64),
                close: 100.0 + i as f64,
                position: if i == 0 { 0 } else { 1 },
                asset_return: if i == 0 { 0.0 } else { 0.01 },
                strategy_return: if i == 0 { 0.0 } else { 0.01 },
                equity: 10_000.0 * 1.01_f64.powi(i as i32),
                benchmark_equity: 10_000.0 + 100.0 * i as f64,
                benchmark_return: if i == 0 { 0.0 } else { 0.01 },
            })
            .collect();
        Ledger::from_rows(rows)
    }

    #[test]
    fn column_accessors_align_with_rows() {
        let ledger = make_ledger(5);
        assert_eq!(ledger.len(), 5);
        assert_eq!(ledger.equity_curve().len(), 5);
        assert_eq!(ledger.strategy_returns().len(), 5);
        assert_eq!(ledger.positions(), vec![0, 1, 1, 1, 1]);
        assert_eq!(ledger.final_equity(), Some(ledger.rows()[4].equity));
    }

    #[test]
    fn empty_ledger() {
        let ledger = Ledger::from_rows(Vec::new());
        assert!(ledger.is_empty());
        assert_eq!(ledger.final_equity(), None);
    }

    #[test]
    fn ledger_serialization_roundtrip() {
        let ledger = make_ledger(3);
        let json = serde_json::to_string(&ledger).unwrap();
        let deser: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(deser.len(), 3);
        assert_eq!(deser.rows()[1].position, 1);
    }
}
