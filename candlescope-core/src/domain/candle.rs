//! Candle: the fundamental market data unit.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Positional wire form: `[timestamp, open, high, low, close, volume]`.
pub type CandleTuple = (String, f64, f64, f64, f64, f64);

/// OHLCV record for one time bucket.
///
/// Serialised positionally as a 6-element array, the form brokers return for
/// historical candle requests. The timestamp string is kept verbatim; its
/// parsed value is only used to check ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CandleTuple", into = "CandleTuple")]
pub struct Candle {
    pub timestamp: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        timestamp: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Typical price `(high + low + close) / 3`.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Parse the timestamp into a comparable instant.
    pub fn parsed_timestamp(&self) -> Result<NaiveDateTime, CandleError> {
        parse_timestamp(&self.timestamp).ok_or_else(|| CandleError::InvalidTimestamp {
            index: None,
            timestamp: self.timestamp.clone(),
        })
    }

    /// Check the per-candle invariants: finite prices, `high >= low`,
    /// finite non-negative volume.
    pub fn check(&self) -> Result<(), CandleError> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(CandleError::NonFinitePrice { index: None });
        }
        if self.high < self.low {
            return Err(CandleError::HighBelowLow {
                index: None,
                high: self.high,
                low: self.low,
            });
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(CandleError::InvalidVolume {
                index: None,
                volume: self.volume,
            });
        }
        Ok(())
    }
}

impl From<CandleTuple> for Candle {
    fn from((timestamp, open, high, low, close, volume): CandleTuple) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl From<Candle> for CandleTuple {
    fn from(c: Candle) -> Self {
        (c.timestamp, c.open, c.high, c.low, c.close, c.volume)
    }
}

/// Invariant violations found while building a candle series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CandleError {
    #[error("candle {}: non-finite price", fmt_index(.index))]
    NonFinitePrice { index: Option<usize> },

    #[error("candle {}: high {high} is below low {low}", fmt_index(.index))]
    HighBelowLow {
        index: Option<usize>,
        high: f64,
        low: f64,
    },

    #[error("candle {}: invalid volume {volume}", fmt_index(.index))]
    InvalidVolume { index: Option<usize>, volume: f64 },

    #[error("candle {}: unrecognised timestamp '{timestamp}'", fmt_index(.index))]
    InvalidTimestamp {
        index: Option<usize>,
        timestamp: String,
    },

    #[error("candle {index}: timestamp '{timestamp}' is earlier than '{previous}'")]
    OutOfOrder {
        index: usize,
        timestamp: String,
        previous: String,
    },
}

impl CandleError {
    /// Attach the position of the offending candle.
    pub(crate) fn at(self, at: usize) -> Self {
        match self {
            Self::NonFinitePrice { .. } => Self::NonFinitePrice { index: Some(at) },
            Self::HighBelowLow { high, low, .. } => Self::HighBelowLow {
                index: Some(at),
                high,
                low,
            },
            Self::InvalidVolume { volume, .. } => Self::InvalidVolume {
                index: Some(at),
                volume,
            },
            Self::InvalidTimestamp { timestamp, .. } => Self::InvalidTimestamp {
                index: Some(at),
                timestamp,
            },
            other @ Self::OutOfOrder { .. } => other,
        }
    }
}

fn fmt_index(index: &Option<usize>) -> String {
    index.map_or_else(|| "?".to_string(), |i| i.to_string())
}

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Accepts `YYYY-MM-DD HH:mm`, `YYYY-MM-DD HH:mm:ss`, RFC 3339 and bare dates.
///
/// RFC 3339 values keep their local wall-clock time so that a series from a
/// single exchange orders the same way it was printed.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
