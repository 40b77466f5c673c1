//! Momentum classifiers.
//!
//! Every engine maps its numbers onto one of three closed label sets through
//! the constructors here, so the thresholding rules live in one place:
//!
//! | Label set     | Values                          |
//! |---------------|---------------------------------|
//! | [`Momentum`]  | Positive / Negative / Neutral   |
//! | [`Trend`]     | Bullish / Bearish / Neutral     |
//! | [`TradeSignal`] | Buy / Sell / Neutral          |

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a single indicator reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Momentum {
    Positive,
    Negative,
    Neutral,
}

impl Momentum {
    /// `Positive` above zero, `Negative` below, `Neutral` at exactly zero.
    pub fn from_sign(value: f64) -> Self {
        Self::from_comparison(value, 0.0)
    }

    /// Compare `value` against `reference`. NaN compares as `Neutral`.
    pub fn from_comparison(value: f64, reference: f64) -> Self {
        match value.partial_cmp(&reference) {
            Some(Ordering::Greater) => Self::Positive,
            Some(Ordering::Less) => Self::Negative,
            _ => Self::Neutral,
        }
    }

    /// RSI momentum has no neutral band: above 50 is positive, anything else
    /// negative.
    pub fn from_rsi(rsi: f64) -> Self {
        if rsi > 50.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    /// Two-state crossover: short above long is positive, otherwise negative.
    pub fn from_crossover(short: f64, long: f64) -> Self {
        if short > long {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// Trend direction from a comparison of two readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    /// `Bullish` when `up > down`, `Bearish` when `up < down`.
    pub fn from_comparison(up: f64, down: f64) -> Self {
        match up.partial_cmp(&down) {
            Some(Ordering::Greater) => Self::Bullish,
            Some(Ordering::Less) => Self::Bearish,
            _ => Self::Neutral,
        }
    }

    /// Combined MACD + VWAP reading: both must agree for a directional label.
    pub fn from_macd_vwap(histogram: f64, close: f64, vwap: f64) -> Self {
        if histogram > 0.0 && close > vwap {
            Self::Bullish
        } else if histogram < 0.0 && close < vwap {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    /// Volume momentum only signals a trend when volume is expanding.
    pub fn from_volume_momentum(momentum: f64, price_change: f64) -> Self {
        if momentum > 0.0 && price_change > 0.0 {
            Self::Bullish
        } else if momentum > 0.0 && price_change < 0.0 {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }
}

/// Overbought/oversold band used for RSI signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiBands {
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiBands {
    fn default() -> Self {
        Self {
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

/// Contrarian trade signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSignal {
    Buy,
    Sell,
    Neutral,
}

impl TradeSignal {
    /// `Sell` at or above the overbought line, `Buy` at or below oversold.
    pub fn from_rsi(rsi: f64, bands: RsiBands) -> Self {
        if rsi >= bands.overbought {
            Self::Sell
        } else if rsi <= bands.oversold {
            Self::Buy
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for Momentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
            Self::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

impl fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
            Self::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}
