//! Signal strategies — pure transforms from a bar series to a per-bar
//! target position.
//!
//! Every strategy implements `SignalGenerator`: equal-length output, entries
//! in {-1, 0, 1}. The bundled strategies only ever emit 0 (flat) or 1
//! (long); the portfolio simulator treats the value as a general signed
//! direction either way. Strategies never see portfolio state — they read
//! bar history and nothing else.

pub mod bollinger_reversion;
pub mod ema_cross;
pub mod factory;
pub mod macd_cross;
pub mod rsi_reversion;
pub mod sma_cross;

pub use bollinger_reversion::BollingerReversion;
pub use ema_cross::EmaCross;
pub use factory::{StrategyError, StrategySpec};
pub use macd_cross::MacdCross;
pub use rsi_reversion::RsiReversion;
pub use sma_cross::SmaCross;

use crate::domain::Bar;

/// A pure per-bar signal generator.
///
/// The output is the pre-lag signal series: the value at index t is computed
/// from data up to and including bar t, and the simulator only acts on it at
/// bar t+1.
pub trait SignalGenerator: Send + Sync {
    /// Stable strategy name (e.g. "sma_cross").
    fn name(&self) -> &'static str;

    /// Generate the signal series; output length equals `bars.len()`.
    fn generate(&self, bars: &[Bar]) -> Vec<i8>;
}

/// Create synthetic bars from close prices for testing.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}
