//! Serializable backtest configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stratlab_core::strategies::{StrategyError, StrategySpec};
use thiserror::Error;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Strategy section of the config: a kind tag plus loose parameters.
///
/// Resolved into a concrete `StrategySpec` (with defaults filled in) by
/// `BacktestConfig::strategy_spec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub kind: String,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

/// Serializable configuration for a single backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub ticker: String,
    #[serde(default = "default_period")]
    pub period: String,
    #[serde(default = "default_interval")]
    pub interval: String,
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
    pub strategy: StrategyConfig,
}

fn default_period() -> String {
    "1y".to_string()
}

fn default_interval() -> String {
    "1d".to_string()
}

fn default_initial_capital() -> f64 {
    10_000.0
}

impl BacktestConfig {
    /// Build a config for a kind tag with default parameters.
    pub fn for_kind(ticker: &str, kind: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            period: default_period(),
            interval: default_interval(),
            initial_capital: default_initial_capital(),
            strategy: StrategyConfig {
                kind: kind.to_string(),
                params: BTreeMap::new(),
            },
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticker.trim().is_empty() {
            return Err(ConfigError::Invalid("ticker must not be empty".into()));
        }
        if !(self.initial_capital > 0.0 && self.initial_capital.is_finite()) {
            return Err(ConfigError::Invalid(
                "initial_capital must be positive and finite".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the strategy section into a concrete spec.
    pub fn strategy_spec(&self) -> Result<StrategySpec, StrategyError> {
        StrategySpec::from_parts(&self.strategy.kind, &self.strategy.params)
    }

    /// Deterministic content hash for this configuration.
    ///
    /// Two identical configs produce the same RunId, so results can be
    /// matched across repeated runs.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("BacktestConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
