//! Analysis configuration.
//!
//! Every indicator period and report knob lives here. The configuration is
//! stored as a TOML file; any field left out takes its default, so an empty
//! file is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::RsiBands;
use crate::indicators::MacdParams;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Parameters for every engine the orchestrator runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub macd_short_period: usize,
    pub macd_long_period: usize,
    pub signal_period: usize,

    pub rsi_period: usize,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,

    pub adx_period: usize,
    pub roc_period: usize,
    pub sma_period: usize,

    pub trend_short_window: usize,
    pub trend_long_window: usize,

    /// Trailing closes for the price change; absent means the whole series.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change_period: Option<usize>,

    pub volume_spike_window: usize,
    pub volume_spike_threshold: f64,

    /// How many trailing entries the intraday report keeps.
    pub rsi_tail: usize,
    pub adx_tail: usize,
    pub candle_tail: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            macd_short_period: 12,
            macd_long_period: 26,
            signal_period: 9,
            rsi_period: 14,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            adx_period: 14,
            roc_period: 14,
            sma_period: 14,
            trend_short_window: 20,
            trend_long_window: 200,
            price_change_period: None,
            volume_spike_window: 10,
            volume_spike_threshold: 2.0,
            rsi_tail: 14,
            adx_tail: 5,
            candle_tail: 5,
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("macd_short_period", self.macd_short_period),
            ("macd_long_period", self.macd_long_period),
            ("signal_period", self.signal_period),
            ("rsi_period", self.rsi_period),
            ("adx_period", self.adx_period),
            ("roc_period", self.roc_period),
            ("sma_period", self.sma_period),
            ("trend_short_window", self.trend_short_window),
            ("trend_long_window", self.trend_long_window),
            ("volume_spike_window", self.volume_spike_window),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(ConfigError::Invalid(format!("{name} must be >= 1")));
        }
        if self.price_change_period == Some(0) {
            return Err(ConfigError::Invalid("price_change_period must be >= 1".into()));
        }
        if self.macd_short_period >= self.macd_long_period {
            return Err(ConfigError::Invalid(format!(
                "macd_short_period ({}) must be below macd_long_period ({})",
                self.macd_short_period, self.macd_long_period
            )));
        }
        if self.trend_short_window >= self.trend_long_window {
            return Err(ConfigError::Invalid(format!(
                "trend_short_window ({}) must be below trend_long_window ({})",
                self.trend_short_window, self.trend_long_window
            )));
        }
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !(in_range(self.rsi_oversold)
            && in_range(self.rsi_overbought)
            && self.rsi_oversold < self.rsi_overbought)
        {
            return Err(ConfigError::Invalid(format!(
                "rsi bands must satisfy 0 <= oversold ({}) < overbought ({}) <= 100",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        if !(self.volume_spike_threshold.is_finite() && self.volume_spike_threshold > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "volume_spike_threshold must be a positive number, got {}",
                self.volume_spike_threshold
            )));
        }
        Ok(())
    }

    pub fn macd_params(&self) -> MacdParams {
        MacdParams {
            short_period: self.macd_short_period,
            long_period: self.macd_long_period,
            signal_period: self.signal_period,
        }
    }

    pub fn rsi_bands(&self) -> RsiBands {
        RsiBands {
            overbought: self.rsi_overbought,
            oversold: self.rsi_oversold,
        }
    }
}
