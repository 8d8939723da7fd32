//! Strategy specification and factory.
//!
//! `StrategySpec` is a closed tagged enum, one case per strategy kind, so
//! dispatch stays exhaustively checkable. `from_parts` is the string-keyed
//! entry point used by config and front-end layers: it resolves a kind tag
//! plus a loose parameter map into a concrete spec, applying the documented
//! defaults for anything missing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    BollingerReversion, EmaCross, MacdCross, RsiReversion, SignalGenerator, SmaCross,
};

/// Errors from strategy construction.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error("unknown strategy kind: {0}")]
    UnknownKind(String),
}

/// Fully-resolved parameters for one strategy variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StrategySpec {
    Sma { fast: usize, slow: usize },
    Ema { fast: usize, slow: usize },
    Rsi { period: usize, lower: f64, upper: f64 },
    Bollinger { window: usize, num_std: f64 },
    Macd { fast: usize, slow: usize, signal: usize },
}

/// Extract a named f64 parameter, falling back to `default`.
fn param(params: &BTreeMap<String, f64>, name: &str, default: f64) -> f64 {
    params.get(name).copied().unwrap_or(default)
}

/// Extract a named usize parameter, falling back to `default`.
fn param_usize(params: &BTreeMap<String, f64>, name: &str, default: usize) -> usize {
    params
        .get(name)
        .copied()
        .map(|v| v as usize)
        .unwrap_or(default)
}

impl StrategySpec {
    /// The kind tag this spec answers to in `from_parts`.
    pub fn kind(&self) -> &'static str {
        match self {
            StrategySpec::Sma { .. } => "sma",
            StrategySpec::Ema { .. } => "ema",
            StrategySpec::Rsi { .. } => "rsi",
            StrategySpec::Bollinger { .. } => "bollinger",
            StrategySpec::Macd { .. } => "macd",
        }
    }

    /// The documented default parameters for a kind tag.
    pub fn default_for(kind: &str) -> Result<Self, StrategyError> {
        Self::from_parts(kind, &BTreeMap::new())
    }

    /// Resolve a kind tag and a loose parameter map into a concrete spec.
    pub fn from_parts(
        kind: &str,
        params: &BTreeMap<String, f64>,
    ) -> Result<Self, StrategyError> {
        match kind {
            "sma" => Ok(StrategySpec::Sma {
                fast: param_usize(params, "fast", 10),
                slow: param_usize(params, "slow", 20),
            }),
            "ema" => Ok(StrategySpec::Ema {
                fast: param_usize(params, "fast", 12),
                slow: param_usize(params, "slow", 26),
            }),
            "rsi" => Ok(StrategySpec::Rsi {
                period: param_usize(params, "period", 14),
                lower: param(params, "lower", 30.0),
                upper: param(params, "upper", 70.0),
            }),
            "bollinger" => Ok(StrategySpec::Bollinger {
                window: param_usize(params, "window", 20),
                num_std: param(params, "num_std", 2.0),
            }),
            "macd" => Ok(StrategySpec::Macd {
                fast: param_usize(params, "fast", 12),
                slow: param_usize(params, "slow", 26),
                signal: param_usize(params, "signal", 9),
            }),
            other => Err(StrategyError::UnknownKind(other.to_string())),
        }
    }

    /// One default spec per kind, in registry order.
    pub fn all_defaults() -> Vec<StrategySpec> {
        ["sma", "ema", "rsi", "bollinger", "macd"]
            .iter()
            .map(|kind| Self::default_for(kind).expect("registry kinds are known"))
            .collect()
    }

    /// Build the generator for this spec.
    pub fn build(&self) -> Box<dyn SignalGenerator> {
        match *self {
            StrategySpec::Sma { fast, slow } => Box::new(SmaCross::new(fast, slow)),
            StrategySpec::Ema { fast, slow } => Box::new(EmaCross::new(fast, slow)),
            StrategySpec::Rsi {
                period,
                lower,
                upper,
            } => Box::new(RsiReversion::new(period, lower, upper)),
            StrategySpec::Bollinger { window, num_std } => {
                Box::new(BollingerReversion::new(window, num_std))
            }
            StrategySpec::Macd { fast, slow, signal } => {
                Box::new(MacdCross::new(fast, slow, signal))
            }
        }
    }
}
