//! Candle provider trait and structured error types.
//!
//! A provider hands the orchestrator an already-fetched, validated series.
//! Network fetching, token handling and retries stay outside this crate;
//! the file-backed providers here read what such a fetcher saved.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{Candle, CandleError, CandleSeries};

/// Errors raised while loading candles.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("provider rejected request: {message} (error code {error_code})")]
    Rejected { message: String, error_code: String },

    #[error("invalid candle data: {0}")]
    InvalidCandles(#[from] CandleError),
}

/// Source of one candle series.
pub trait CandleProvider: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    fn fetch(&self) -> Result<CandleSeries, DataError>;
}

/// In-memory candles, validated on every fetch.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    candles: Vec<Candle>,
}

impl StaticProvider {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }
}

impl CandleProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self) -> Result<CandleSeries, DataError> {
        Ok(CandleSeries::new(self.candles.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_provider_validates() {
        let good = StaticProvider::new(vec![
            Candle::new("2024-01-02 09:15", 10.0, 11.0, 9.0, 10.5, 100.0),
            Candle::new("2024-01-02 09:20", 10.5, 12.0, 10.0, 11.5, 150.0),
        ]);
        assert_eq!(good.fetch().unwrap().len(), 2);

        let bad = StaticProvider::new(vec![
            Candle::new("2024-01-02 09:20", 10.0, 11.0, 9.0, 10.5, 100.0),
            Candle::new("2024-01-02 09:15", 10.5, 12.0, 10.0, 11.5, 150.0),
        ]);
        let err = bad.fetch().unwrap_err();
        assert!(matches!(
            err,
            DataError::InvalidCandles(CandleError::OutOfOrder { index: 1, .. })
        ));
    }

    #[test]
    fn providers_are_object_safe() {
        let providers: Vec<Box<dyn CandleProvider>> =
            vec![Box::new(StaticProvider::new(Vec::new()))];
        assert_eq!(providers[0].name(), "static");
        assert!(providers[0].fetch().unwrap().is_empty());
    }
}
