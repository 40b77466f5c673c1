//! Report types returned by the orchestrator.
//!
//! Reports are built fresh per call and are plain data: every field
//! serialises to JSON, numeric fields are `Option` so the momentum-only mode
//! can strip them while keeping the labels.

use serde::{Deserialize, Serialize};

use crate::classify::{Momentum, TradeSignal, Trend};
use crate::indicators::{AdxEntry, FlaggedCandle, VolumeMomentum};

/// A numeric series plus its momentum label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    pub momentum: Momentum,
}

impl IndicatorSummary {
    pub fn new(values: Vec<f64>, momentum: Momentum) -> Self {
        Self {
            values: Some(values),
            momentum,
        }
    }

    fn strip(self) -> Self {
        Self {
            values: None,
            momentum: self.momentum,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChangeSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    pub momentum: Momentum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossoverSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_average: Option<f64>,
    pub momentum: Momentum,
}

/// Historical analysis: one summary per indicator.
///
/// `macd` carries the histogram, the series its momentum label is read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalReport {
    pub price_change: PriceChangeSummary,
    pub macd: IndicatorSummary,
    pub rsi: IndicatorSummary,
    pub roc: IndicatorSummary,
    pub moving_average: IndicatorSummary,
    pub moving_average_crossover: CrossoverSummary,
}

impl HistoricalReport {
    /// Drop every numeric value, keep the labels.
    pub fn into_momentum_only(self) -> Self {
        Self {
            price_change: PriceChangeSummary {
                percentage: None,
                momentum: self.price_change.momentum,
            },
            macd: self.macd.strip(),
            rsi: self.rsi.strip(),
            roc: self.roc.strip(),
            moving_average: self.moving_average.strip(),
            moving_average_crossover: CrossoverSummary {
                short_average: None,
                long_average: None,
                momentum: self.moving_average_crossover.momentum,
            },
        }
    }

    /// `(indicator, label)` pairs in report order.
    pub fn labels(&self) -> [(&'static str, Momentum); 6] {
        [
            ("priceChange", self.price_change.momentum),
            ("macd", self.macd.momentum),
            ("rsi", self.rsi.momentum),
            ("roc", self.roc.momentum),
            ("movingAverage", self.moving_average.momentum),
            ("movingAverageCrossover", self.moving_average_crossover.momentum),
        ]
    }
}

/// Intraday snapshot: last values plus short trailing windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntradayReport {
    pub volume_momentum: VolumeMomentum,
    /// Last MACD histogram value (EMA-seeded signal).
    pub macd: f64,
    pub vwap: f64,
    pub macd_vwap_signal: Trend,
    pub rsi_values: Vec<f64>,
    pub rsi_signals: Vec<TradeSignal>,
    pub adx: Vec<AdxEntry>,
    pub recent_candles: Vec<FlaggedCandle>,
}

/// Output of [`analyze`](crate::analysis::analyze), tagged with the mode
/// that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum AnalysisReport {
    Full(HistoricalReport),
    MomentumOnly(HistoricalReport),
    Intraday(IntradayReport),
}

impl AnalysisReport {
    pub fn historical(&self) -> Option<&HistoricalReport> {
        match self {
            Self::Full(r) | Self::MomentumOnly(r) => Some(r),
            Self::Intraday(_) => None,
        }
    }

    pub fn intraday(&self) -> Option<&IntradayReport> {
        match self {
            Self::Intraday(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HistoricalReport {
        HistoricalReport {
            price_change: PriceChangeSummary {
                percentage: Some(4.2),
                momentum: Momentum::Positive,
            },
            macd: IndicatorSummary::new(vec![0.1, -0.2], Momentum::Negative),
            rsi: IndicatorSummary::new(vec![55.0], Momentum::Positive),
            roc: IndicatorSummary::new(vec![1.0], Momentum::Positive),
            moving_average: IndicatorSummary::new(vec![100.0], Momentum::Neutral),
            moving_average_crossover: CrossoverSummary {
                short_average: Some(101.0),
                long_average: Some(99.0),
                momentum: Momentum::Positive,
            },
        }
    }

    #[test]
    fn momentum_only_strips_values_keeps_labels() {
        let full = sample();
        let stripped = full.clone().into_momentum_only();
        assert_eq!(stripped.labels(), full.labels());
        assert!(stripped.macd.values.is_none());
        assert!(stripped.price_change.percentage.is_none());

        let json = serde_json::to_value(&stripped).unwrap();
        assert_eq!(json["macd"], serde_json::json!({ "momentum": "Negative" }));
        assert_eq!(json["priceChange"], serde_json::json!({ "momentum": "Positive" }));
    }

    #[test]
    fn report_is_mode_tagged() {
        let report = AnalysisReport::MomentumOnly(sample().into_momentum_only());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "momentum-only");
        assert_eq!(json["rsi"]["momentum"], "Positive");

        let back: AnalysisReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }
}
