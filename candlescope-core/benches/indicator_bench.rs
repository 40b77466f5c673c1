//! Criterion benchmarks for Candlescope hot paths.
//!
//! Benchmarks:
//! 1. Individual indicator engines (SMA, MACD, RSI, ADX, VWAP) over growing series
//! 2. Full orchestrator passes (historical and intraday reports)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use candlescope_core::analysis::{analyze, AnalysisMode};
use candlescope_core::config::AnalysisConfig;
use candlescope_core::domain::{Candle, CandleSeries};
use candlescope_core::indicators::{adx, macd, rsi, sma, vwap, MacdParams, SignalPolicy};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_candles(n: usize) -> Vec<Candle> {
    let base = chrono::NaiveDate::from_ymd_opt(2020, 1, 2)
        .and_then(|d| d.and_hms_opt(9, 15, 0))
        .unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let open = close - 0.3;
            let ts = base + chrono::Duration::minutes(i as i64);
            Candle::new(
                ts.format("%Y-%m-%d %H:%M").to_string(),
                open,
                close + 1.5,
                close - 1.5,
                close,
                1_000_000.0 + (i % 500_000) as f64,
            )
        })
        .collect()
}

// ── 1. Indicator engines ─────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");

    for &count in &[375, 1875, 7500] {
        let candles = make_candles(count);
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

        group.bench_with_input(BenchmarkId::new("sma_20", count), &closes, |b, closes| {
            b.iter(|| sma(black_box(closes), 20))
        });
        group.bench_with_input(BenchmarkId::new("macd_ema_seeded", count), &closes, |b, closes| {
            b.iter(|| macd(black_box(closes), MacdParams::default(), SignalPolicy::EmaSeeded))
        });
        group.bench_with_input(BenchmarkId::new("macd_sma_signal", count), &closes, |b, closes| {
            b.iter(|| macd(black_box(closes), MacdParams::default(), SignalPolicy::SmaOfMacd))
        });
        group.bench_with_input(BenchmarkId::new("rsi_14", count), &closes, |b, closes| {
            b.iter(|| rsi(black_box(closes), 14))
        });
        group.bench_with_input(BenchmarkId::new("adx_14", count), &candles, |b, candles| {
            b.iter(|| adx(black_box(candles), 14))
        });
        group.bench_with_input(BenchmarkId::new("vwap", count), &candles, |b, candles| {
            b.iter(|| vwap(black_box(candles)))
        });
    }

    group.finish();
}

// ── 2. Orchestrator ──────────────────────────────────────────────────

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    let config = AnalysisConfig::default();
    let series = CandleSeries::new(make_candles(1875)).unwrap();

    for mode in [AnalysisMode::Full, AnalysisMode::MomentumOnly, AnalysisMode::Intraday] {
        group.bench_function(mode.as_str(), |b| {
            b.iter(|| analyze(black_box(&series), black_box(&config), mode))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_indicators, bench_analysis);
criterion_main!(benches);
