//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = k * price[t] + (1 - k) * EMA[t-1], k = 2 / (period + 1)
//! Seed: EMA[0] = price[0] (the raw first price, not an SMA of the first
//! `period` values). MACD depends on this seeding.
//! Lookback: 0.

use crate::error::{require_len, require_period, IndicatorError};

/// Smoothing factor `2 / (period + 1)`.
pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// One EMA recurrence step.
#[inline]
pub fn ema_step(price: f64, prev: f64, k: f64) -> f64 {
    price * k + prev * (1.0 - k)
}

/// EMA of `prices`, one value per input.
pub fn ema(prices: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    require_period("ema", "period", period)?;
    require_len("ema", 1, prices.len())?;

    let k = smoothing_factor(period);
    let (seed, rest) = (prices[0], &prices[1..]);

    let mut result = Vec::with_capacity(prices.len());
    result.push(seed);
    result.extend(rest.iter().scan(seed, |prev, &price| {
        *prev = ema_step(price, *prev, k);
        Some(*prev)
    }));
    Ok(result)
}
