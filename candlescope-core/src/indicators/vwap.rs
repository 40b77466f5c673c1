//! Volume-Weighted Average Price (VWAP).
//!
//! Cumulative over the whole series, never reset:
//!   typical[t] = (high + low + close) / 3
//!   VWAP[t]    = sum(typical * volume) / sum(volume) over 0..=t
//! Lookback: 0. Until any volume has traded the VWAP is the close.
//!
//! The combined MACD + VWAP signal pairs the EMA-seeded MACD histogram with
//! the close's position relative to VWAP.

use serde::{Deserialize, Serialize};

use crate::classify::Trend;
use crate::domain::Candle;
use crate::error::{require_len, IndicatorError};
use crate::indicators::macd::{macd, MacdOutput, MacdParams, SignalPolicy};
use crate::indicators::series::IndicatorSeries;

/// Running totals threaded through the VWAP fold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VwapAccumulator {
    pub cumulative_tpv: f64,
    pub cumulative_volume: f64,
}

impl VwapAccumulator {
    pub fn update(&mut self, candle: &Candle) -> f64 {
        self.cumulative_tpv += candle.typical_price() * candle.volume;
        self.cumulative_volume += candle.volume;
        if self.cumulative_volume > 0.0 {
            self.cumulative_tpv / self.cumulative_volume
        } else {
            candle.close
        }
    }
}

/// Running accumulator state after each candle.
pub fn vwap_accumulation(candles: &[Candle]) -> Vec<VwapAccumulator> {
    candles
        .iter()
        .scan(VwapAccumulator::default(), |acc, c| {
            acc.update(c);
            Some(*acc)
        })
        .collect()
}

/// VWAP for every candle.
pub fn vwap(candles: &[Candle]) -> Result<IndicatorSeries, IndicatorError> {
    require_len("vwap", 1, candles.len())?;
    let values = candles
        .iter()
        .scan(VwapAccumulator::default(), |acc, c| Some(acc.update(c)))
        .collect();
    Ok(IndicatorSeries::new(0, values))
}

/// MACD + VWAP agreement label from index `long_period` onward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdVwapSignals {
    pub offset: usize,
    pub signals: Vec<Trend>,
}

impl MacdVwapSignals {
    pub fn last(&self) -> Option<Trend> {
        self.signals.last().copied()
    }
}

/// MACD + VWAP signals computed from scratch with the EMA-seeded MACD.
pub fn macd_vwap_signals(
    candles: &[Candle],
    params: MacdParams,
) -> Result<MacdVwapSignals, IndicatorError> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let macd = macd(&closes, params, SignalPolicy::EmaSeeded)?;
    let vwap = vwap(candles)?;
    Ok(combine_macd_vwap(&closes, &macd, &vwap))
}

/// Pair an already computed MACD histogram with an already computed VWAP.
pub fn combine_macd_vwap(
    closes: &[f64],
    macd: &MacdOutput,
    vwap: &IndicatorSeries,
) -> MacdVwapSignals {
    let signals = macd
        .histogram
        .iter_indexed()
        .filter_map(|(i, h)| {
            let close = *closes.get(i)?;
            // vwap has no warm-up, so every histogram index has a value
            let v = vwap.get(i).unwrap_or(close);
            Some(Trend::from_macd_vwap(h, close, v))
        })
        .collect();

    MacdVwapSignals {
        offset: macd.histogram.offset(),
        signals,
    }
}
