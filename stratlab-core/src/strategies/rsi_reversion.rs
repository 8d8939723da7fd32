//! RSI mean reversion.
//!
//! Enter long when RSI drops below `lower`, exit when it rises above
//! `upper`. The neutral band between the thresholds keeps the series' fill
//! value (flat) rather than the previous bar's state, so an entry only
//! persists while RSI actually sits below `lower`. Undefined leading RSI
//! values land in the hold arm and stay flat.

use crate::domain::Bar;
use crate::indicators::{Indicator, Rsi};

use super::SignalGenerator;

#[derive(Debug, Clone)]
pub struct RsiReversion {
    pub period: usize,
    pub lower: f64,
    pub upper: f64,
}

impl RsiReversion {
    pub fn new(period: usize, lower: f64, upper: f64) -> Self {
        assert!(period >= 1, "period must be >= 1");
        assert!(lower < upper, "lower threshold must be < upper threshold");
        Self {
            period,
            lower,
            upper,
        }
    }
}

impl SignalGenerator for RsiReversion {
    fn name(&self) -> &'static str {
        "rsi_reversion"
    }

    fn generate(&self, bars: &[Bar]) -> Vec<i8> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let rsi = Rsi::new(self.period).compute(&closes);

        let mut signals = vec![0i8; bars.len()];
        for (i, &r) in rsi.iter().enumerate() {
            signals[i] = if r < self.lower {
                1
            } else if r > self.upper {
                0
            } else {
                // Neutral band (and NaN): hold the container default.
                signals[i]
            };
        }
        signals
    }
}
