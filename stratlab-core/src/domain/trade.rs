//! Trade — a completed round-trip derived from position transitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a round-trip trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Long,
    Short,
}

impl TradeDirection {
    /// Signed multiplier: +1 for long, -1 for short.
    pub fn sign(self) -> f64 {
        match self {
            TradeDirection::Long => 1.0,
            TradeDirection::Short => -1.0,
        }
    }

    /// Direction implied by a nonzero position value.
    pub fn from_position(position: i8) -> Self {
        if position > 0 {
            TradeDirection::Long
        } else {
            TradeDirection::Short
        }
    }
}

/// A complete round-trip trade: entry transition to exit transition.
///
/// Trades are derived from the simulated position series, never authored
/// directly. `pnl` assumes the trade deployed the full initial capital,
/// independent of the compounding equity curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub direction: TradeDirection,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub entry_price: f64,
    pub exit_price: f64,
    /// Signed fractional return of the round trip, direction-adjusted.
    pub return_pct: f64,
    /// `return_pct * initial_capital`.
    pub pnl: f64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }

    /// Calendar days between entry and exit.
    pub fn duration_days(&self) -> i64 {
        (self.exit_date - self.entry_date).num_days()
    }
}
