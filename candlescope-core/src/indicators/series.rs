//! Tail-aligned indicator output.
//!
//! An indicator with a warm-up of `offset` candles produces one value for
//! every candle index `offset..n`. Indices inside the warm-up have no value;
//! they are absent rather than padded with NaN or null.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    offset: usize,
    values: Vec<f64>,
}

impl IndicatorSeries {
    pub fn new(offset: usize, values: Vec<f64>) -> Self {
        Self { offset, values }
    }

    /// Number of leading candle indices without a value.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at candle index `index`, `None` inside the warm-up or past the end.
    pub fn get(&self, index: usize) -> Option<f64> {
        index
            .checked_sub(self.offset)
            .and_then(|i| self.values.get(i).copied())
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// The last `n` values (fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[f64] {
        &self.values[self.values.len().saturating_sub(n)..]
    }

    /// `(candle_index, value)` pairs.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i + self.offset, v))
    }
}
