//! Price change percentage over the trailing `time_period` closes.
//!
//! base   = close[len - time_period]
//! change = (close[last] - base) / base * 100
//!
//! A `time_period` equal to the series length measures first close to last.

use serde::{Deserialize, Serialize};

use crate::classify::Momentum;
use crate::error::{require_len, require_period, IndicatorError};
use crate::indicators::roc::percent_change;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub percentage: f64,
    pub momentum: Momentum,
}

pub fn price_change_percentage(
    closes: &[f64],
    time_period: usize,
) -> Result<PriceChange, IndicatorError> {
    require_period("price_change", "time period", time_period)?;
    require_len("price_change", time_period, closes.len())?;

    let base_index = closes.len() - time_period;
    let current = closes[closes.len() - 1];
    let percentage = percent_change("price_change", closes[base_index], current, base_index)?;

    Ok(PriceChange {
        percentage,
        momentum: Momentum::from_sign(percentage),
    })
}
