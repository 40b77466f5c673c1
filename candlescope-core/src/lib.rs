//! Candlescope Core: candle domain types, indicator engines, momentum
//! classifiers and the analysis orchestrator.
//!
//! This crate contains:
//! - Domain types (candles, validated candle series)
//! - Indicator engines (SMA, EMA, MACD, VWAP, RSI, ADX, ROC, price change, volume)
//! - Momentum/trend/signal classifiers shared by every engine
//! - The orchestrator that composes engines into historical or intraday reports
//! - TOML-backed analysis configuration
//! - File-backed candle providers (JSON, CSV)

pub mod analysis;
pub mod classify;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;

pub use analysis::{analyze, AnalysisMode, AnalysisReport};
pub use classify::{Momentum, RsiBands, TradeSignal, Trend};
pub use config::{AnalysisConfig, ConfigError};
pub use domain::{Candle, CandleError, CandleSeries};
pub use error::IndicatorError;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: domain, config and report types are Send + Sync,
    /// so analyses can run on worker threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Candle>();
        require_sync::<domain::Candle>();
        require_send::<domain::CandleSeries>();
        require_sync::<domain::CandleSeries>();

        // Indicator outputs
        require_send::<indicators::IndicatorSeries>();
        require_sync::<indicators::IndicatorSeries>();
        require_send::<indicators::MacdOutput>();
        require_sync::<indicators::MacdOutput>();
        require_send::<indicators::AdxOutput>();
        require_sync::<indicators::AdxOutput>();
        require_send::<indicators::FlaggedCandle>();
        require_sync::<indicators::FlaggedCandle>();
        require_send::<indicators::VolumeMomentum>();
        require_sync::<indicators::VolumeMomentum>();

        // Config and reports
        require_send::<config::AnalysisConfig>();
        require_sync::<config::AnalysisConfig>();
        require_send::<analysis::AnalysisReport>();
        require_sync::<analysis::AnalysisReport>();

        // Errors
        require_send::<error::IndicatorError>();
        require_sync::<error::IndicatorError>();
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
    }

    /// Providers are shareable trait objects.
    #[test]
    fn provider_trait_objects_are_send_sync() {
        fn _check(p: Box<dyn data::CandleProvider>) -> Box<dyn Send + Sync> {
            Box::new(p)
        }
    }
}
