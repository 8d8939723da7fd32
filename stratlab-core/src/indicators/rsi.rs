//! Relative Strength Index (RSI).
//!
//! RSI = 100 - 100 / (1 + RS), RS = rolling-mean(gain) / rolling-mean(loss)
//! over `period` bars, where gain = max(delta, 0) and loss = max(-delta, 0).
//! The delta at index 0 is undefined, so the first defined RSI sits at
//! index `period`. Lookback: period.
//!
//! Degenerate windows: zero average loss with gains present -> 100; zero
//! average gain with losses present -> 0; a flat window (both zero) is the
//! undefined 0/0 ratio and stays NaN.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, closes: &[f64]) -> Vec<f64> {
        let n = closes.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period + 1 {
            return result;
        }

        let mut gains = vec![0.0; n];
        let mut losses = vec![0.0; n];
        for i in 1..n {
            let delta = closes[i] - closes[i - 1];
            gains[i] = delta.max(0.0);
            losses[i] = (-delta).max(0.0);
        }

        // The window ending at `period` is the first with no undefined delta.
        for i in self.period..n {
            let start = i + 1 - self.period;
            let avg_gain: f64 = gains[start..=i].iter().sum::<f64>() / self.period as f64;
            let avg_loss: f64 = losses[start..=i].iter().sum::<f64>() / self.period as f64;
            result[i] = rsi_value(avg_gain, avg_loss);
        }

        result
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            f64::NAN
        } else {
            100.0
        }
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
