//! Volume engines.
//!
//! Spike detection: average volume over the trailing `window` candles (one
//! fixed window ending at the last candle), then flag every candle whose
//! volume is strictly above `threshold * average`.
//!
//! Volume momentum: total and average volume over the whole series,
//! momentum = (total - average) / average, labelled with the direction of the
//! first-to-last close change.

use serde::{Deserialize, Serialize};

use crate::classify::Trend;
use crate::domain::Candle;
use crate::error::{require_len, require_period, IndicatorError};

/// Positional wire form: the candle tuple plus the spike flag.
pub type FlaggedTuple = (String, f64, f64, f64, f64, f64, bool);

/// A candle annotated with its volume-spike flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FlaggedTuple", into = "FlaggedTuple")]
pub struct FlaggedCandle {
    pub candle: Candle,
    pub is_spike: bool,
}

impl From<FlaggedTuple> for FlaggedCandle {
    fn from((timestamp, open, high, low, close, volume, is_spike): FlaggedTuple) -> Self {
        Self {
            candle: Candle::new(timestamp, open, high, low, close, volume),
            is_spike,
        }
    }
}

impl From<FlaggedCandle> for FlaggedTuple {
    fn from(f: FlaggedCandle) -> Self {
        let c = f.candle;
        (c.timestamp, c.open, c.high, c.low, c.close, c.volume, f.is_spike)
    }
}

/// Mean volume of the last `window` candles.
pub fn trailing_average_volume(candles: &[Candle], window: usize) -> Result<f64, IndicatorError> {
    require_period("volume_spike", "window", window)?;
    require_len("volume_spike", window, candles.len())?;
    let total: f64 = candles[candles.len() - window..]
        .iter()
        .map(|c| c.volume)
        .sum();
    Ok(total / window as f64)
}

pub fn volume_spikes(
    candles: &[Candle],
    window: usize,
    threshold: f64,
) -> Result<Vec<FlaggedCandle>, IndicatorError> {
    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(IndicatorError::invalid(
            "volume_spike",
            format!("threshold must be a positive finite number, got {threshold}"),
        ));
    }
    let cutoff = threshold * trailing_average_volume(candles, window)?;

    Ok(candles
        .iter()
        .map(|c| FlaggedCandle {
            candle: c.clone(),
            is_spike: c.volume > cutoff,
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMomentum {
    pub start_timestamp: String,
    pub end_timestamp: String,
    pub total_volume: f64,
    pub average_volume: f64,
    pub momentum: f64,
    pub trend: Trend,
}

pub fn volume_momentum(candles: &[Candle]) -> Result<VolumeMomentum, IndicatorError> {
    let (Some(first), Some(last)) = (candles.first(), candles.last()) else {
        return Err(IndicatorError::InsufficientData {
            indicator: "volume_momentum",
            required: 1,
            available: 0,
        });
    };

    let total_volume: f64 = candles.iter().map(|c| c.volume).sum();
    let average_volume = total_volume / candles.len() as f64;
    let momentum = if average_volume == 0.0 {
        0.0
    } else {
        (total_volume - average_volume) / average_volume
    };

    Ok(VolumeMomentum {
        start_timestamp: first.timestamp.clone(),
        end_timestamp: last.timestamp.clone(),
        total_volume,
        average_volume,
        momentum,
        trend: Trend::from_volume_momentum(momentum, last.close - first.close),
    })
}
