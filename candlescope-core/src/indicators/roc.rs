//! Rate of Change (ROC).
//!
//! ROC[t] = (close[t] - close[t - period]) / close[t - period] * 100
//! Lookback: period.
//! A zero base close is an error, never an infinite percentage.

use crate::classify::Momentum;
use crate::error::{require_len, require_period, IndicatorError};
use crate::indicators::series::IndicatorSeries;

/// Percentage change of `current` relative to `base`.
pub(crate) fn percent_change(
    indicator: &'static str,
    base: f64,
    current: f64,
    base_index: usize,
) -> Result<f64, IndicatorError> {
    if base == 0.0 {
        return Err(IndicatorError::ZeroBasePrice {
            indicator,
            index: base_index,
        });
    }
    Ok((current - base) / base * 100.0)
}

pub fn roc(closes: &[f64], period: usize) -> Result<IndicatorSeries, IndicatorError> {
    require_period("roc", "period", period)?;
    require_len("roc", period + 1, closes.len())?;

    let values = closes
        .iter()
        .zip(&closes[period..])
        .enumerate()
        .map(|(i, (&base, &current))| percent_change("roc", base, current, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IndicatorSeries::new(period, values))
}

/// Sign of the latest ROC value.
pub fn roc_momentum(series: &IndicatorSeries) -> Momentum {
    series.last().map_or(Momentum::Neutral, Momentum::from_sign)
}
