//! Simple moving average crossover.
//!
//! Long while the fast SMA sits above the slow SMA, flat otherwise. Bars
//! where either window has not filled compare as false on both sides and
//! resolve to flat.

use crate::domain::Bar;
use crate::indicators::{Indicator, Sma};

use super::SignalGenerator;

#[derive(Debug, Clone)]
pub struct SmaCross {
    pub fast: usize,
    pub slow: usize,
}

impl SmaCross {
    pub fn new(fast: usize, slow: usize) -> Self {
        assert!(fast >= 1, "fast window must be >= 1");
        assert!(slow > fast, "slow window must be > fast window");
        Self { fast, slow }
    }
}

impl SignalGenerator for SmaCross {
    fn name(&self) -> &'static str {
        "sma_cross"
    }

    fn generate(&self, bars: &[Bar]) -> Vec<i8> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = Sma::new(self.fast).compute(&closes);
        let slow = Sma::new(self.slow).compute(&closes);

        fast.iter()
            .zip(&slow)
            .map(|(f, s)| i8::from(f > s))
            .collect()
    }
}
