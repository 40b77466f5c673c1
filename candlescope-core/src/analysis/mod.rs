//! Analysis orchestrator.
//!
//! [`analyze`] is the single entry point callers use: it validates the
//! configuration, runs every engine the mode needs over one candle series and
//! assembles a report. The first engine error aborts the whole report; there
//! are no partial results.

pub mod report;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::domain::CandleSeries;
use crate::error::IndicatorError;
use crate::indicators::{
    adx, combine_macd_vwap, crossover, macd, price_change_percentage, price_vs_average, roc,
    roc_momentum, rsi, rsi_momentum, rsi_signals, sma, volume_momentum, volume_spikes, vwap,
    IndicatorSeries, SignalPolicy,
};

pub use report::{
    AnalysisReport, CrossoverSummary, HistoricalReport, IndicatorSummary, IntradayReport,
    PriceChangeSummary,
};

/// Which report to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMode {
    /// Historical indicators with numeric series and labels.
    #[default]
    Full,
    /// Historical indicators, labels only.
    MomentumOnly,
    /// Intraday snapshot: volume, MACD + VWAP, RSI, ADX, volume spikes.
    Intraday,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::MomentumOnly => "momentum-only",
            Self::Intraday => "intraday",
        }
    }

    /// MACD signal policy the mode's report uses.
    pub fn signal_policy(&self) -> SignalPolicy {
        match self {
            Self::Full | Self::MomentumOnly => SignalPolicy::SmaOfMacd,
            Self::Intraday => SignalPolicy::EmaSeeded,
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "momentum-only" | "momentum_only" => Ok(Self::MomentumOnly),
            "intraday" => Ok(Self::Intraday),
            other => Err(format!(
                "unknown analysis mode '{other}' (expected full, momentum-only or intraday)"
            )),
        }
    }
}

/// Run every engine `mode` needs over `series`.
pub fn analyze(
    series: &CandleSeries,
    config: &AnalysisConfig,
    mode: AnalysisMode,
) -> Result<AnalysisReport, IndicatorError> {
    config
        .validate()
        .map_err(|e| IndicatorError::invalid("config", e.to_string()))?;
    debug!(mode = %mode, candles = series.len(), "starting analysis");

    let policy = mode.signal_policy();
    let report = match mode {
        AnalysisMode::Full => AnalysisReport::Full(historical(series, config, policy)?),
        AnalysisMode::MomentumOnly => {
            AnalysisReport::MomentumOnly(historical(series, config, policy)?.into_momentum_only())
        }
        AnalysisMode::Intraday => AnalysisReport::Intraday(intraday(series, config, policy)?),
    };

    debug!(mode = %mode, "analysis complete");
    Ok(report)
}

fn historical(
    series: &CandleSeries,
    config: &AnalysisConfig,
    policy: SignalPolicy,
) -> Result<HistoricalReport, IndicatorError> {
    let closes = series.closes();

    let time_period = config.price_change_period.unwrap_or(closes.len());
    let change = price_change_percentage(&closes, time_period)?;
    debug!(percentage = change.percentage, momentum = %change.momentum, "price change");

    let macd = macd(&closes, config.macd_params(), policy)?;
    let macd_momentum = macd.momentum();
    debug!(values = macd.histogram.len(), momentum = %macd_momentum, "macd");

    let rsi = rsi(&closes, config.rsi_period)?;
    let rsi_label = rsi_momentum(&rsi);
    debug!(values = rsi.len(), momentum = %rsi_label, "rsi");

    let roc = roc(&closes, config.roc_period)?;
    let roc_label = roc_momentum(&roc);
    debug!(values = roc.len(), momentum = %roc_label, "roc");

    let sma = sma(&closes, config.sma_period)?;
    let sma_label = price_vs_average(&closes, &sma);
    debug!(values = sma.len(), momentum = %sma_label, "moving average");

    let cross = crossover(&closes, config.trend_short_window, config.trend_long_window)?;
    debug!(
        short = cross.short_average,
        long = cross.long_average,
        momentum = %cross.momentum,
        "moving average crossover"
    );

    Ok(HistoricalReport {
        price_change: PriceChangeSummary {
            percentage: Some(change.percentage),
            momentum: change.momentum,
        },
        macd: IndicatorSummary::new(macd.histogram.into_values(), macd_momentum),
        rsi: IndicatorSummary::new(rsi.into_values(), rsi_label),
        roc: IndicatorSummary::new(roc.into_values(), roc_label),
        moving_average: IndicatorSummary::new(sma.into_values(), sma_label),
        moving_average_crossover: CrossoverSummary {
            short_average: Some(cross.short_average),
            long_average: Some(cross.long_average),
            momentum: cross.momentum,
        },
    })
}

fn intraday(
    series: &CandleSeries,
    config: &AnalysisConfig,
    policy: SignalPolicy,
) -> Result<IntradayReport, IndicatorError> {
    let candles = series.candles();
    let closes = series.closes();

    let volume = volume_momentum(candles)?;
    debug!(momentum = volume.momentum, trend = %volume.trend, "volume momentum");

    let macd = macd(&closes, config.macd_params(), policy)?;
    let vwap = vwap(candles)?;
    let signals = combine_macd_vwap(&closes, &macd, &vwap);
    let macd_last = last_value("macd", &macd.histogram)?;
    let vwap_last = last_value("vwap", &vwap)?;
    let signal_last = signals.last().ok_or(IndicatorError::InsufficientData {
        indicator: "macd_vwap",
        required: config.macd_long_period + 1,
        available: closes.len(),
    })?;
    debug!(histogram = macd_last, vwap = vwap_last, signal = %signal_last, "macd + vwap");

    let spikes = volume_spikes(
        candles,
        config.volume_spike_window,
        config.volume_spike_threshold,
    )?;
    let spike_count = spikes.iter().filter(|f| f.is_spike).count();
    debug!(spikes = spike_count, "volume spikes");

    let adx = adx(candles, config.adx_period)?;
    let entries = adx.entries(candles);
    debug!(entries = entries.len(), "adx");

    let rsi = rsi(&closes, config.rsi_period)?;
    let rsi_values = rsi.tail(config.rsi_tail).to_vec();
    let rsi_labels = tail(rsi_signals(&rsi, config.rsi_bands()), config.rsi_tail);
    debug!(values = rsi_values.len(), "rsi");

    Ok(IntradayReport {
        volume_momentum: volume,
        macd: macd_last,
        vwap: vwap_last,
        macd_vwap_signal: signal_last,
        rsi_values,
        rsi_signals: rsi_labels,
        adx: tail(entries, config.adx_tail),
        recent_candles: tail(spikes, config.candle_tail),
    })
}

fn last_value(indicator: &'static str, series: &IndicatorSeries) -> Result<f64, IndicatorError> {
    series.last().ok_or(IndicatorError::InsufficientData {
        indicator,
        required: series.offset() + 1,
        available: series.offset(),
    })
}

fn tail<T>(mut items: Vec<T>, n: usize) -> Vec<T> {
    let start = items.len().saturating_sub(n);
    items.split_off(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Momentum;
    use crate::domain::Candle;
    use crate::indicators::make_candles;

    fn rally(n: usize) -> CandleSeries {
        let closes: Vec<f64> = (0..n)
            .map(|i| 100.0 + i as f64 * 0.5 + (i as f64 * 0.9).sin())
            .collect();
        CandleSeries::new(make_candles(&closes)).unwrap()
    }

    #[test]
    fn full_report_has_values_and_labels() {
        let report = analyze(&rally(250), &AnalysisConfig::default(), AnalysisMode::Full).unwrap();
        let AnalysisReport::Full(hist) = report else {
            panic!("expected full report");
        };
        assert!(hist.price_change.percentage.unwrap() > 0.0);
        assert_eq!(hist.price_change.momentum, Momentum::Positive);
        // SMA-of-MACD histogram: offset 26 + 9 - 2 = 33
        assert_eq!(hist.macd.values.as_ref().unwrap().len(), 250 - 33);
        assert_eq!(hist.rsi.values.as_ref().unwrap().len(), 250 - 14);
        assert_eq!(hist.roc.values.as_ref().unwrap().len(), 250 - 14);
        assert_eq!(hist.moving_average.values.as_ref().unwrap().len(), 250 - 13);
        assert_eq!(hist.moving_average_crossover.momentum, Momentum::Positive);
    }

    #[test]
    fn momentum_only_matches_full_labels() {
        let series = rally(250);
        let config = AnalysisConfig::default();
        let full = analyze(&series, &config, AnalysisMode::Full).unwrap();
        let labels = analyze(&series, &config, AnalysisMode::MomentumOnly).unwrap();

        let (full, labels) = (full.historical().unwrap(), labels.historical().unwrap());
        assert_eq!(full.labels(), labels.labels());
        assert!(labels.rsi.values.is_none());
        assert!(labels.moving_average_crossover.short_average.is_none());
    }

    #[test]
    fn intraday_report_tails() {
        let report =
            analyze(&rally(120), &AnalysisConfig::default(), AnalysisMode::Intraday).unwrap();
        let intraday = report.intraday().unwrap();
        assert_eq!(intraday.rsi_values.len(), 14);
        assert_eq!(intraday.rsi_signals.len(), 14);
        assert_eq!(intraday.adx.len(), 5);
        assert_eq!(intraday.recent_candles.len(), 5);
        assert_eq!(
            intraday.recent_candles.last().unwrap().candle.timestamp,
            rally(120).last().unwrap().timestamp
        );
        assert!(intraday.vwap > 0.0);
    }

    #[test]
    fn short_series_fails_fast() {
        // long SMA window is 200
        let err = analyze(&rally(150), &AnalysisConfig::default(), AnalysisMode::Full).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                indicator: "ma_crossover",
                required: 200,
                available: 150,
            }
        );
    }

    #[test]
    fn intraday_needs_macd_history() {
        let err =
            analyze(&rally(20), &AnalysisConfig::default(), AnalysisMode::Intraday).unwrap_err();
        assert!(matches!(err, IndicatorError::InsufficientData { indicator: "macd", .. }));
    }

    #[test]
    fn invalid_config_is_rejected_before_engines_run() {
        let config = AnalysisConfig {
            rsi_period: 0,
            ..AnalysisConfig::default()
        };
        let err = analyze(&rally(250), &config, AnalysisMode::Full).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidParameter { indicator: "config", .. }));
    }

    #[test]
    fn analysis_is_idempotent() {
        let series = rally(250);
        let config = AnalysisConfig::default();
        for mode in [AnalysisMode::Full, AnalysisMode::Intraday] {
            let a = serde_json::to_string(&analyze(&series, &config, mode).unwrap()).unwrap();
            let b = serde_json::to_string(&analyze(&series, &config, mode).unwrap()).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn mode_parses_from_cli_strings() {
        assert_eq!("full".parse::<AnalysisMode>().unwrap(), AnalysisMode::Full);
        assert_eq!(
            "momentum-only".parse::<AnalysisMode>().unwrap(),
            AnalysisMode::MomentumOnly
        );
        assert_eq!("intraday".parse::<AnalysisMode>().unwrap(), AnalysisMode::Intraday);
        assert!("weekly".parse::<AnalysisMode>().is_err());
        assert_eq!(AnalysisMode::MomentumOnly.to_string(), "momentum-only");
    }

    #[test]
    fn intraday_uses_ema_seeded_signal() {
        assert_eq!(AnalysisMode::Intraday.signal_policy(), SignalPolicy::EmaSeeded);
        assert_eq!(AnalysisMode::Full.signal_policy(), SignalPolicy::SmaOfMacd);
        assert_eq!(AnalysisMode::MomentumOnly.signal_policy(), SignalPolicy::SmaOfMacd);
    }

    #[test]
    fn price_change_period_is_honoured() {
        let candles: Vec<Candle> = make_candles(&(0..250).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let series = CandleSeries::new(candles).unwrap();
        let config = AnalysisConfig {
            price_change_period: Some(2),
            ..AnalysisConfig::default()
        };
        let report = analyze(&series, &config, AnalysisMode::Full).unwrap();
        // base = close[248] = 348, last = 349
        let pct = report.historical().unwrap().price_change.percentage.unwrap();
        assert!((pct - 1.0 / 348.0 * 100.0).abs() < 1e-9);
    }
}
