//! Look-ahead contamination tests for every indicator series.
//!
//! No indicator value at candle t may depend on candles t+1 or later.
//!
//! Method: compute on a truncated series (candles 0..100) and the full series
//! (candles 0..200). Assert every index the truncated run produced is
//! identical in the full run.

use candlescope_core::domain::Candle;
use candlescope_core::indicators::*;

/// Generate N candles of synthetic OHLCV data with realistic variation.
fn make_test_candles(n: usize) -> Vec<Candle> {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|d| d.and_hms_opt(9, 15, 0))
        .unwrap();
    let mut candles = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price += change;
        price = f64::max(price, 10.0);

        let open = price - 0.5;
        let close = price + 0.3;
        let high = open.max(close) + 2.0;
        let low = open.min(close) - 2.0;
        let ts = base + chrono::Duration::minutes(5 * i as i64);

        candles.push(Candle::new(
            ts.format("%Y-%m-%d %H:%M").to_string(),
            open,
            high,
            low,
            close,
            1000.0 + (i as f64 * 100.0),
        ));
    }

    candles
}

const FULL: usize = 200;
const TRUNCATED: usize = 100;

fn assert_series_prefix(name: &str, truncated: &IndicatorSeries, full: &IndicatorSeries) {
    assert_eq!(truncated.offset(), full.offset(), "{name}: offset changed");
    assert!(!truncated.is_empty(), "{name}: truncated run produced nothing");
    for (i, v) in truncated.iter_indexed() {
        let w = full
            .get(i)
            .unwrap_or_else(|| panic!("{name}: index {i} missing in full run"));
        assert_eq!(
            v.to_bits(),
            w.to_bits(),
            "{name}: look-ahead at index {i}: truncated={v}, full={w}"
        );
    }
}

fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

#[test]
fn no_lookahead_sma() {
    let candles = make_test_candles(FULL);
    let c = closes(&candles);
    assert_series_prefix(
        "sma(20)",
        &sma(&c[..TRUNCATED], 20).unwrap(),
        &sma(&c, 20).unwrap(),
    );
}

#[test]
fn no_lookahead_ema() {
    let c = closes(&make_test_candles(FULL));
    let truncated = ema(&c[..TRUNCATED], 12).unwrap();
    let full = ema(&c, 12).unwrap();
    for (i, (a, b)) in truncated.iter().zip(&full).enumerate() {
        assert_eq!(a.to_bits(), b.to_bits(), "ema: look-ahead at index {i}");
    }
}

#[test]
fn no_lookahead_macd_both_policies() {
    let c = closes(&make_test_candles(FULL));
    for policy in [SignalPolicy::EmaSeeded, SignalPolicy::SmaOfMacd] {
        let truncated = macd(&c[..TRUNCATED], MacdParams::default(), policy).unwrap();
        let full = macd(&c, MacdParams::default(), policy).unwrap();
        assert_series_prefix("macd line", &truncated.macd, &full.macd);
        assert_series_prefix("macd signal", &truncated.signal, &full.signal);
        assert_series_prefix("macd histogram", &truncated.histogram, &full.histogram);
    }
}

#[test]
fn no_lookahead_vwap() {
    let candles = make_test_candles(FULL);
    assert_series_prefix(
        "vwap",
        &vwap(&candles[..TRUNCATED]).unwrap(),
        &vwap(&candles).unwrap(),
    );
}

#[test]
fn no_lookahead_macd_vwap_signals() {
    let candles = make_test_candles(FULL);
    let truncated = macd_vwap_signals(&candles[..TRUNCATED], MacdParams::default()).unwrap();
    let full = macd_vwap_signals(&candles, MacdParams::default()).unwrap();
    assert_eq!(truncated.offset, full.offset);
    assert_eq!(truncated.signals[..], full.signals[..truncated.signals.len()]);
}

#[test]
fn no_lookahead_rsi() {
    let c = closes(&make_test_candles(FULL));
    assert_series_prefix(
        "rsi(14)",
        &rsi(&c[..TRUNCATED], 14).unwrap(),
        &rsi(&c, 14).unwrap(),
    );
}

#[test]
fn no_lookahead_adx() {
    let candles = make_test_candles(FULL);
    let truncated = adx(&candles[..TRUNCATED], 14).unwrap();
    let full = adx(&candles, 14).unwrap();
    assert_series_prefix("+DI", &truncated.plus_di, &full.plus_di);
    assert_series_prefix("-DI", &truncated.minus_di, &full.minus_di);
    assert_series_prefix("DX", &truncated.dx, &full.dx);
    assert_series_prefix("ADX", &truncated.adx, &full.adx);
}

#[test]
fn no_lookahead_roc() {
    let c = closes(&make_test_candles(FULL));
    assert_series_prefix(
        "roc(14)",
        &roc(&c[..TRUNCATED], 14).unwrap(),
        &roc(&c, 14).unwrap(),
    );
}
