//! Average Directional Index (ADX).
//!
//! Steps:
//! 1. Compute +DM, -DM and true range for each consecutive candle pair
//! 2. Keep rolling sums of +DM, -DM and TR over the trailing `period` steps
//! 3. +DI = 100 * sum(+DM) / sum(TR)
//! 4. -DI = 100 * sum(-DM) / sum(TR)
//! 5. DX = 100 * |+DI - -DI| / (+DI + -DI)
//! 6. ADX = rolling mean of DX over `period` values
//!
//! Lookback: period for DI/DX, 2 * period - 1 for ADX.
//! Zero true-range sums give DI = 0; a zero DI sum gives DX = 0.

use serde::{Deserialize, Serialize};

use crate::classify::Trend;
use crate::domain::Candle;
use crate::error::{require_len, require_period, IndicatorError};
use crate::indicators::series::IndicatorSeries;
use crate::indicators::window::RollingSum;

/// Directional movement between two consecutive candles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalMove {
    pub plus_dm: f64,
    pub minus_dm: f64,
    pub true_range: f64,
}

impl DirectionalMove {
    pub fn between(prev: &Candle, curr: &Candle) -> Self {
        let high_diff = curr.high - prev.high;
        let low_diff = prev.low - curr.low;

        let plus_dm = if high_diff > low_diff && high_diff > 0.0 {
            high_diff
        } else {
            0.0
        };
        let minus_dm = if low_diff > high_diff && low_diff > 0.0 {
            low_diff
        } else {
            0.0
        };
        let true_range = (curr.high - curr.low)
            .max((curr.high - prev.close).abs())
            .max((curr.low - prev.close).abs());

        Self {
            plus_dm,
            minus_dm,
            true_range,
        }
    }
}

/// Rolling sums of the three movement components.
#[derive(Debug, Clone)]
struct MovementSums {
    plus_dm: RollingSum,
    minus_dm: RollingSum,
    true_range: RollingSum,
}

impl MovementSums {
    fn new(period: usize) -> Self {
        Self {
            plus_dm: RollingSum::non_negative(period),
            minus_dm: RollingSum::non_negative(period),
            true_range: RollingSum::non_negative(period),
        }
    }

    fn push(&mut self, mv: &DirectionalMove) -> Option<(f64, f64)> {
        let plus = self.plus_dm.push(mv.plus_dm);
        let minus = self.minus_dm.push(mv.minus_dm);
        let tr = self.true_range.push(mv.true_range);
        Some(directional_indices(plus?, minus?, tr?))
    }
}

fn directional_indices(sum_plus_dm: f64, sum_minus_dm: f64, sum_tr: f64) -> (f64, f64) {
    if sum_tr == 0.0 {
        return (0.0, 0.0);
    }
    (
        percent_of(sum_plus_dm, sum_tr),
        percent_of(sum_minus_dm, sum_tr),
    )
}

/// `100 * part / whole`, held to [0, 100].
fn percent_of(part: f64, whole: f64) -> f64 {
    (100.0 * part / whole).clamp(0.0, 100.0)
}

fn directional_index(plus_di: f64, minus_di: f64) -> f64 {
    let di_sum = plus_di + minus_di;
    if di_sum == 0.0 {
        0.0
    } else {
        percent_of((plus_di - minus_di).abs(), di_sum)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdxOutput {
    pub period: usize,
    pub plus_di: IndicatorSeries,
    pub minus_di: IndicatorSeries,
    pub dx: IndicatorSeries,
    pub adx: IndicatorSeries,
}

/// One fully warmed-up ADX reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdxEntry {
    pub timestamp: String,
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,
    pub momentum: Trend,
}

impl AdxOutput {
    /// +DI vs -DI at a candle index, `None` inside the warm-up.
    pub fn momentum_at(&self, index: usize) -> Option<Trend> {
        let plus = self.plus_di.get(index)?;
        let minus = self.minus_di.get(index)?;
        Some(Trend::from_comparison(plus, minus))
    }

    /// Entries for every candle where ADX is defined.
    pub fn entries(&self, candles: &[Candle]) -> Vec<AdxEntry> {
        self.adx
            .iter_indexed()
            .filter_map(|(i, adx)| {
                let plus_di = self.plus_di.get(i)?;
                let minus_di = self.minus_di.get(i)?;
                Some(AdxEntry {
                    timestamp: candles.get(i)?.timestamp.clone(),
                    adx,
                    plus_di,
                    minus_di,
                    momentum: Trend::from_comparison(plus_di, minus_di),
                })
            })
            .collect()
    }
}

pub fn adx(candles: &[Candle], period: usize) -> Result<AdxOutput, IndicatorError> {
    require_period("adx", "period", period)?;
    require_len("adx", period + 1, candles.len())?;

    let indices: Vec<(f64, f64)> = candles
        .windows(2)
        .map(|w| DirectionalMove::between(&w[0], &w[1]))
        .scan(MovementSums::new(period), |sums, mv| Some(sums.push(&mv)))
        .flatten()
        .collect();

    let (plus_di, minus_di): (Vec<f64>, Vec<f64>) = indices.iter().copied().unzip();
    let dx: Vec<f64> = indices
        .iter()
        .map(|&(p, m)| directional_index(p, m))
        .collect();
    let adx: Vec<f64> = dx
        .iter()
        .scan(RollingSum::non_negative(period), |acc, &v| Some(acc.push_mean(v)))
        .flatten()
        .map(|v| v.min(100.0))
        .collect();

    Ok(AdxOutput {
        period,
        plus_di: IndicatorSeries::new(period, plus_di),
        minus_di: IndicatorSeries::new(period, minus_di),
        dx: IndicatorSeries::new(period, dx),
        adx: IndicatorSeries::new(2 * period - 1, adx),
    })
}
