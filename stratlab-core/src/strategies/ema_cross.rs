//! Exponential moving average crossover.
//!
//! Long while the fast EMA sits above the slow EMA, flat otherwise. EMAs
//! are seeded by the first close, so the comparison is defined from bar 0.

use crate::domain::Bar;
use crate::indicators::{Ema, Indicator};

use super::SignalGenerator;

#[derive(Debug, Clone)]
pub struct EmaCross {
    pub fast: usize,
    pub slow: usize,
}

impl EmaCross {
    pub fn new(fast: usize, slow: usize) -> Self {
        assert!(fast >= 1, "fast span must be >= 1");
        assert!(slow > fast, "slow span must be > fast span");
        Self { fast, slow }
    }
}

impl SignalGenerator for EmaCross {
    fn name(&self) -> &'static str {
        "ema_cross"
    }

    fn generate(&self, bars: &[Bar]) -> Vec<i8> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = Ema::new(self.fast).compute(&closes);
        let slow = Ema::new(self.slow).compute(&closes);

        fast.iter()
            .zip(&slow)
            .map(|(f, s)| i8::from(f > s))
            .collect()
    }
}
