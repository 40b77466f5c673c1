//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! Seed: simple mean of the first `period` gains/losses.
//! Then: avg = (avg * (period - 1) + value) / period
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period.
//! Edge case: avg_loss == 0 → RSI = 100 (the ratio is never formed).

use crate::classify::{Momentum, RsiBands, TradeSignal};
use crate::error::{require_len, require_period, IndicatorError};
use crate::indicators::series::IndicatorSeries;

/// Wilder-smoothed average gain/loss pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WilderAverages {
    pub avg_gain: f64,
    pub avg_loss: f64,
}

impl WilderAverages {
    fn step(self, gain: f64, loss: f64, period: f64) -> Self {
        Self {
            avg_gain: (self.avg_gain * (period - 1.0) + gain) / period,
            avg_loss: (self.avg_loss * (period - 1.0) + loss) / period,
        }
    }

    pub fn rsi(&self) -> f64 {
        if self.avg_loss == 0.0 {
            return 100.0;
        }
        100.0 - 100.0 / (1.0 + self.avg_gain / self.avg_loss)
    }
}

fn gain_loss(prev: f64, curr: f64) -> (f64, f64) {
    let change = curr - prev;
    (change.max(0.0), (-change).max(0.0))
}

/// RSI for every close from index `period` onward.
pub fn rsi(closes: &[f64], period: usize) -> Result<IndicatorSeries, IndicatorError> {
    require_period("rsi", "period", period)?;
    require_len("rsi", period + 1, closes.len())?;

    let period_f = period as f64;
    let mut steps = closes.windows(2).map(|w| gain_loss(w[0], w[1]));

    let (sum_gain, sum_loss) = steps
        .by_ref()
        .take(period)
        .fold((0.0, 0.0), |(g, l), (gain, loss)| (g + gain, l + loss));
    let seed = WilderAverages {
        avg_gain: sum_gain / period_f,
        avg_loss: sum_loss / period_f,
    };

    let mut values = Vec::with_capacity(closes.len() - period);
    values.push(seed.rsi());
    values.extend(steps.scan(seed, |avgs, (gain, loss)| {
        *avgs = avgs.step(gain, loss, period_f);
        Some(avgs.rsi())
    }));

    Ok(IndicatorSeries::new(period, values))
}

/// `Positive` when the latest RSI is above 50, otherwise `Negative`.
pub fn rsi_momentum(series: &IndicatorSeries) -> Momentum {
    series.last().map_or(Momentum::Negative, Momentum::from_rsi)
}

/// Buy/Sell/Neutral label for every RSI value.
pub fn rsi_signals(series: &IndicatorSeries, bands: RsiBands) -> Vec<TradeSignal> {
    series
        .values()
        .iter()
        .map(|&v| TradeSignal::from_rsi(v, bands))
        .collect()
}
