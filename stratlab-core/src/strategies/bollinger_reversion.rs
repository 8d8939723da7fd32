//! Bollinger band mean reversion.
//!
//! Enter long when the close drops below the lower band, exit when it rises
//! above the upper band. As with the RSI strategy, the zone between the
//! bands keeps the series' fill value (flat) rather than carrying the
//! previous bar's state forward.

use crate::domain::Bar;
use crate::indicators::{Bollinger, Indicator};

use super::SignalGenerator;

#[derive(Debug, Clone)]
pub struct BollingerReversion {
    pub window: usize,
    pub num_std: f64,
}

impl BollingerReversion {
    pub fn new(window: usize, num_std: f64) -> Self {
        assert!(window >= 2, "window must be >= 2");
        assert!(
            num_std > 0.0 && num_std.is_finite(),
            "num_std must be positive and finite"
        );
        Self { window, num_std }
    }
}

impl SignalGenerator for BollingerReversion {
    fn name(&self) -> &'static str {
        "bollinger_reversion"
    }

    fn generate(&self, bars: &[Bar]) -> Vec<i8> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let lower = Bollinger::lower(self.window, self.num_std).compute(&closes);
        let upper = Bollinger::upper(self.window, self.num_std).compute(&closes);

        let mut signals = vec![0i8; bars.len()];
        for i in 0..closes.len() {
            signals[i] = if closes[i] < lower[i] {
                1
            } else if closes[i] > upper[i] {
                0
            } else {
                signals[i]
            };
        }
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::make_bars;

    #[test]
    fn output_length_matches_input() {
        let bars = make_bars(&[100.0; 30]);
        let signals = BollingerReversion::new(20, 2.0).generate(&bars);
        assert_eq!(signals.len(), 30);
    }

    #[test]
    fn buys_a_sharp_drop_below_the_lower_band() {
        // Stable prices, then a crash far below the band.
        let mut closes = vec![100.0, 101.0, 99.0, 100.5, 99.5, 100.0];
        closes.push(80.0);
        let signals = BollingerReversion::new(5, 2.0).generate(&make_bars(&closes));
        assert_eq!(signals[6], 1, "{signals:?}");
    }

    #[test]
    fn exits_a_spike_above_the_upper_band() {
        let mut closes = vec![100.0, 101.0, 99.0, 100.5, 99.5, 100.0];
        closes.push(120.0);
        let signals = BollingerReversion::new(5, 2.0).generate(&make_bars(&closes));
        assert_eq!(signals[6], 0);
    }

    #[test]
    fn quiet_market_stays_flat() {
        let closes: Vec<f64> = (0..30)
            .map(|i| 100.0 + if i % 2 == 0 { 0.1 } else { -0.1 })
            .collect();
        let signals = BollingerReversion::new(10, 2.0).generate(&make_bars(&closes));
        assert!(signals.iter().all(|&s| s == 0), "{signals:?}");
    }

    #[test]
    fn undefined_leading_windows_are_flat() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 - 3.0 * i as f64).collect();
        let signals = BollingerReversion::new(5, 2.0).generate(&make_bars(&closes));
        assert_eq!(&signals[..4], &[0, 0, 0, 0]);
    }
}
