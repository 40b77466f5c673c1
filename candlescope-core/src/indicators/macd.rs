//! Moving Average Convergence Divergence (MACD).
//!
//! MACD line = EMA(short) - EMA(long) of closes, both EMAs seeded with the
//! first close. The line is reported from index `long - 1`.
//!
//! Two signal-line policies are supported:
//! - `EmaSeeded`: EMA of the MACD line starting at index `long`, seeded with
//!   the MACD value itself (so the first histogram value is 0).
//!   Lookback: long.
//! - `SmaOfMacd`: simple moving average of the reported MACD line.
//!   Lookback: long + signal - 2.
//!
//! Histogram = MACD - signal wherever the signal exists.

use serde::{Deserialize, Serialize};

use crate::classify::Momentum;
use crate::error::{require_len, require_period, IndicatorError};
use crate::indicators::ema::{ema, ema_step, smoothing_factor};
use crate::indicators::series::IndicatorSeries;
use crate::indicators::sma::moving_average;

/// How the signal line is derived from the MACD line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalPolicy {
    /// Recursive EMA seeded with the MACD value at index `long`.
    EmaSeeded,
    /// Independent SMA pass over the MACD line.
    SmaOfMacd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub short_period: usize,
    pub long_period: usize,
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            short_period: 12,
            long_period: 26,
            signal_period: 9,
        }
    }
}

impl MacdParams {
    pub fn validate(&self) -> Result<(), IndicatorError> {
        require_period("macd", "short period", self.short_period)?;
        require_period("macd", "long period", self.long_period)?;
        require_period("macd", "signal period", self.signal_period)?;
        if self.short_period >= self.long_period {
            return Err(IndicatorError::invalid(
                "macd",
                format!(
                    "short period {} must be below long period {}",
                    self.short_period, self.long_period
                ),
            ));
        }
        Ok(())
    }

    /// Minimum number of closes needed for one histogram value.
    pub fn required_len(&self, policy: SignalPolicy) -> usize {
        match policy {
            SignalPolicy::EmaSeeded => self.long_period + 1,
            SignalPolicy::SmaOfMacd => self.long_period + self.signal_period - 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    pub policy: SignalPolicy,
    pub macd: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

impl MacdOutput {
    /// Sign of the latest histogram value.
    pub fn momentum(&self) -> Momentum {
        self.histogram
            .last()
            .map_or(Momentum::Neutral, Momentum::from_sign)
    }

    /// Sign label for every histogram value.
    pub fn histogram_momentum(&self) -> Vec<Momentum> {
        self.histogram
            .values()
            .iter()
            .map(|&h| Momentum::from_sign(h))
            .collect()
    }
}

pub fn macd(
    closes: &[f64],
    params: MacdParams,
    policy: SignalPolicy,
) -> Result<MacdOutput, IndicatorError> {
    params.validate()?;
    require_len("macd", params.required_len(policy), closes.len())?;

    let short = ema(closes, params.short_period)?;
    let long = ema(closes, params.long_period)?;
    let line: Vec<f64> = short.iter().zip(&long).map(|(s, l)| s - l).collect();

    let first = params.long_period - 1;
    let signal = match policy {
        SignalPolicy::EmaSeeded => {
            let k = smoothing_factor(params.signal_period);
            let values = line[params.long_period..]
                .iter()
                .scan(None, |prev: &mut Option<f64>, &m| {
                    let s = ema_step(m, prev.unwrap_or(m), k);
                    *prev = Some(s);
                    Some(s)
                })
                .collect();
            IndicatorSeries::new(params.long_period, values)
        }
        SignalPolicy::SmaOfMacd => {
            let values = moving_average(&line[first..], params.signal_period)?;
            IndicatorSeries::new(first + params.signal_period - 1, values)
        }
    };

    let histogram = IndicatorSeries::new(
        signal.offset(),
        signal.iter_indexed().map(|(i, s)| line[i] - s).collect(),
    );

    Ok(MacdOutput {
        policy,
        macd: IndicatorSeries::new(first, line[first..].to_vec()),
        signal,
        histogram,
    })
}
