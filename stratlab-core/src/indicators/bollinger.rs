//! Bollinger Bands — rolling mean +/- standard deviation multiplier.
//!
//! Three bands, selected per instance:
//! - Middle: SMA(close, window)
//! - Upper: middle + num_std * stdev(close, window)
//! - Lower: middle - num_std * stdev(close, window)
//!
//! Uses the sample standard deviation (divide by N-1), so a window of 1 has
//! no defined deviation and the banded values stay NaN.
//! Lookback: window - 1.

use super::Indicator;

/// Which band of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    window: usize,
    num_std: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub fn upper(window: usize, num_std: f64) -> Self {
        Self::new(window, num_std, BollingerBand::Upper)
    }

    pub fn middle(window: usize, num_std: f64) -> Self {
        Self::new(window, num_std, BollingerBand::Middle)
    }

    pub fn lower(window: usize, num_std: f64) -> Self {
        Self::new(window, num_std, BollingerBand::Lower)
    }

    fn new(window: usize, num_std: f64, band: BollingerBand) -> Self {
        assert!(window >= 1, "Bollinger window must be >= 1");
        assert!(
            num_std > 0.0 && num_std.is_finite(),
            "num_std must be positive and finite"
        );
        let suffix = match band {
            BollingerBand::Upper => "upper",
            BollingerBand::Middle => "middle",
            BollingerBand::Lower => "lower",
        };
        Self {
            window,
            num_std,
            band,
            name: format!("bollinger_{suffix}_{window}_{num_std}"),
        }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn compute(&self, closes: &[f64]) -> Vec<f64> {
        let n = closes.len();
        let mut result = vec![f64::NAN; n];

        if n < self.window {
            return result;
        }

        for i in (self.window - 1)..n {
            let window = &closes[(i + 1 - self.window)..=i];
            let mean = window.iter().sum::<f64>() / self.window as f64;

            result[i] = match self.band {
                BollingerBand::Middle => mean,
                BollingerBand::Upper => mean + self.num_std * sample_std(window, mean),
                BollingerBand::Lower => mean - self.num_std * sample_std(window, mean),
            };
        }

        result
    }
}

/// Sample standard deviation (N-1 divisor); NaN for fewer than 2 values.
fn sample_std(window: &[f64], mean: f64) -> f64 {
    if window.len() < 2 {
        return f64::NAN;
    }
    let variance =
        window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (window.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn middle_band_is_sma() {
        let closes = [10.0, 11.0, 12.0, 13.0, 14.0];
        let result = Bollinger::middle(3, 2.0).compute(&closes);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 12.0, DEFAULT_EPSILON);
        assert_approx(result[4], 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bands_are_symmetric_around_middle() {
        let closes = [10.0, 12.0, 11.0, 13.0, 15.0, 14.0];
        let mid = Bollinger::middle(4, 2.0).compute(&closes);
        let upper = Bollinger::upper(4, 2.0).compute(&closes);
        let lower = Bollinger::lower(4, 2.0).compute(&closes);

        for i in 3..closes.len() {
            assert_approx(upper[i] - mid[i], mid[i] - lower[i], DEFAULT_EPSILON);
            assert!(upper[i] > mid[i]);
            assert!(lower[i] < mid[i]);
        }
    }

    #[test]
    fn known_sample_std() {
        // Window [10, 12, 14]: mean 12, sample variance ((4+0+4)/2) = 4, std 2
        let closes = [10.0, 12.0, 14.0];
        let upper = Bollinger::upper(3, 2.0).compute(&closes);
        assert_approx(upper[2], 12.0 + 2.0 * 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn window_of_one_has_no_deviation() {
        let closes = [10.0, 11.0];
        let upper = Bollinger::upper(1, 2.0).compute(&closes);
        assert!(upper[0].is_nan());
        assert!(upper[1].is_nan());
        // The middle band is still defined: it is just the close itself.
        let mid = Bollinger::middle(1, 2.0).compute(&closes);
        assert_approx(mid[0], 10.0, DEFAULT_EPSILON);
    }

    #[test]
    fn lookback() {
        assert_eq!(Bollinger::upper(20, 2.0).lookback(), 19);
    }

    #[test]
    #[should_panic(expected = "num_std must be positive and finite")]
    fn rejects_nan_multiplier() {
        Bollinger::upper(20, f64::NAN);
    }
}
