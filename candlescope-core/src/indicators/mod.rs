//! Indicator engines.
//!
//! Every engine is a pure function over a candle slice or a close series.
//! Inputs are validated before any computation; outputs are tail-aligned
//! [`IndicatorSeries`] values (or a single reading) with warm-up indices
//! absent rather than padded.
//!
//! Recursive state (previous EMA, Wilder averages, rolling sums) is threaded
//! through `scan`/`fold` accumulators, so nothing is shared between calls.

pub mod adx;
pub mod ema;
pub mod macd;
pub mod price_change;
pub mod roc;
pub mod rsi;
pub mod series;
pub mod sma;
pub mod volume;
pub mod vwap;
pub mod window;

pub use adx::{adx, AdxEntry, AdxOutput, DirectionalMove};
pub use ema::{ema, ema_step, smoothing_factor};
pub use macd::{macd, MacdOutput, MacdParams, SignalPolicy};
pub use price_change::{price_change_percentage, PriceChange};
pub use roc::{roc, roc_momentum};
pub use rsi::{rsi, rsi_momentum, rsi_signals, WilderAverages};
pub use series::IndicatorSeries;
pub use sma::{crossover, moving_average, price_vs_average, sma, Crossover};
pub use volume::{
    trailing_average_volume, volume_momentum, volume_spikes, FlaggedCandle, FlaggedTuple,
    VolumeMomentum,
};
pub use vwap::{combine_macd_vwap, macd_vwap_signals, vwap, vwap_accumulation, MacdVwapSignals, VwapAccumulator};
pub use window::RollingSum;

/// Create synthetic candles from close prices for testing.
///
/// Generates plausible OHLCV: open = prev_close (or close for the first
/// candle), high = max(open, close) + 1.0, low = min(open, close) - 1.0,
/// volume = 1000. Timestamps start at 2024-01-02 09:15 in 5-minute steps.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<crate::domain::Candle> {
    use crate::domain::Candle;
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|d| d.and_hms_opt(9, 15, 0))
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            let ts = base + chrono::Duration::minutes(5 * i as i64);
            Candle::new(
                ts.format("%Y-%m-%d %H:%M").to_string(),
                open,
                high,
                low,
                close,
                1000.0,
            )
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
