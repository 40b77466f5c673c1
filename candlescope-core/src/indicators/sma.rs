//! Simple Moving Average (SMA).
//!
//! Mean of each fixed window, summed afresh per window so a flat run of
//! closes averages to exactly that close.
//! Lookback: window - 1 (first valid value at index window-1).
//!
//! Also hosts the two close-vs-average momentum readings built on it:
//! price against its SMA, and a short SMA against a long SMA.

use crate::classify::Momentum;
use crate::error::{require_len, require_period, IndicatorError};
use crate::indicators::series::IndicatorSeries;

/// Windowed average of `series`.
///
/// Output length is `series.len() - window + 1`; element `i` is the mean of
/// `series[i..i + window]`.
pub fn moving_average(series: &[f64], window: usize) -> Result<Vec<f64>, IndicatorError> {
    require_period("sma", "window", window)?;
    require_len("sma", window, series.len())?;

    Ok(series.windows(window).map(mean).collect())
}

/// SMA of closing prices, aligned to candle indices.
pub fn sma(closes: &[f64], window: usize) -> Result<IndicatorSeries, IndicatorError> {
    let values = moving_average(closes, window)?;
    Ok(IndicatorSeries::new(window - 1, values))
}

/// Last close against the last SMA value.
pub fn price_vs_average(closes: &[f64], averages: &IndicatorSeries) -> Momentum {
    match (closes.last(), averages.last()) {
        (Some(&price), Some(avg)) => Momentum::from_comparison(price, avg),
        _ => Momentum::Neutral,
    }
}

/// Short-vs-long moving average readings at the end of the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossover {
    pub short_average: f64,
    pub long_average: f64,
    pub momentum: Momentum,
}

/// Compare the latest short-window SMA with the latest long-window SMA.
pub fn crossover(closes: &[f64], short: usize, long: usize) -> Result<Crossover, IndicatorError> {
    require_period("ma_crossover", "short window", short)?;
    if short >= long {
        return Err(IndicatorError::invalid(
            "ma_crossover",
            format!("short window {short} must be below long window {long}"),
        ));
    }
    require_len("ma_crossover", long, closes.len())?;

    // Only the final window of each average matters here.
    let short_average = mean(&closes[closes.len() - short..]);
    let long_average = mean(&closes[closes.len() - long..]);

    Ok(Crossover {
        short_average,
        long_average,
        momentum: Momentum::from_crossover(short_average, long_average),
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
