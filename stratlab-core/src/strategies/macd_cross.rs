//! MACD line / signal line crossover.
//!
//! MACD = EMA(close, fast) - EMA(close, slow); the signal line is an EMA of
//! the MACD series itself. Long while MACD sits above the signal line, flat
//! otherwise.

use crate::domain::Bar;
use crate::indicators::{ema_of_series, Ema, Indicator};

use super::SignalGenerator;

#[derive(Debug, Clone)]
pub struct MacdCross {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl MacdCross {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1, "fast span must be >= 1");
        assert!(slow > fast, "slow span must be > fast span");
        assert!(signal >= 1, "signal span must be >= 1");
        Self { fast, slow, signal }
    }
}

impl SignalGenerator for MacdCross {
    fn name(&self) -> &'static str {
        "macd_cross"
    }

    fn generate(&self, bars: &[Bar]) -> Vec<i8> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let ema_fast = Ema::new(self.fast).compute(&closes);
        let ema_slow = Ema::new(self.slow).compute(&closes);

        let macd: Vec<f64> = ema_fast
            .iter()
            .zip(&ema_slow)
            .map(|(f, s)| f - s)
            .collect();
        let signal_line = ema_of_series(&macd, self.signal);

        macd.iter()
            .zip(&signal_line)
            .map(|(m, s)| i8::from(m > s))
            .collect()
    }
}
