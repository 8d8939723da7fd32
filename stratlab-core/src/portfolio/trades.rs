//! Trade extraction — derives round-trip trades from the position series.
//!
//! Single left-to-right scan over the ledger rows. A trade opens on a
//! flat-to-nonzero transition, closes when the position changes, and a
//! reversal closes and reopens on the same bar. A position still open after
//! the last bar is force-closed at that bar's price.

use crate::domain::{LedgerRow, Trade, TradeDirection};

/// State of the trade currently open during the scan.
struct OpenPosition {
    position: i8,
    entry_date: chrono::NaiveDate,
    entry_price: f64,
}

/// Extract round-trip trades from simulated ledger rows.
///
/// Each trade is sized as if it deployed the full initial capital,
/// independent of the compounding equity curve: `pnl = return_pct * capital`.
pub(crate) fn extract_trades(rows: &[LedgerRow], initial_capital: f64) -> Vec<Trade> {
    let mut trades = Vec::new();
    let mut open: Option<OpenPosition> = None;

    for row in rows {
        match open.as_ref() {
            None if row.position != 0 => {
                open = Some(OpenPosition {
                    position: row.position,
                    entry_date: row.date,
                    entry_price: row.close,
                });
            }
            Some(current) if row.position != current.position => {
                trades.push(close_trade(current, row.date, row.close, initial_capital));
                open = if row.position != 0 {
                    // Reversal: reopen on the same bar with the new direction.
                    Some(OpenPosition {
                        position: row.position,
                        entry_date: row.date,
                        entry_price: row.close,
                    })
                } else {
                    None
                };
            }
            _ => {}
        }
    }

    // Force-close anything still open at the final bar.
    if let (Some(current), Some(last)) = (open.as_ref(), rows.last()) {
        trades.push(close_trade(current, last.date, last.close, initial_capital));
    }

    trades
}

fn close_trade(
    open: &OpenPosition,
    exit_date: chrono::NaiveDate,
    exit_price: f64,
    initial_capital: f64,
) -> Trade {
    let direction = TradeDirection::from_position(open.position);
    let return_pct = (exit_price / open.entry_price - 1.0) * direction.sign();
    Trade {
        direction,
        entry_date: open.entry_date,
        exit_date,
        entry_price: open.entry_price,
        exit_price,
        return_pct,
        pnl: return_pct * initial_capital,
    }
}
