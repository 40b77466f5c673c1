//! CandleSeries: validated, read-only sequence of candles.

use serde::{Deserialize, Serialize};

use super::candle::{Candle, CandleError};

/// Ordered, immutable candle series.
///
/// Built once per analysis (usually by a [`CandleProvider`](crate::data::CandleProvider))
/// and only ever borrowed by the engines. Construction enforces the candle
/// invariants and non-decreasing timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Candle>", into = "Vec<Candle>")]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self, CandleError> {
        let mut previous = None;
        for (i, candle) in candles.iter().enumerate() {
            candle.check().map_err(|e| e.at(i))?;
            let ts = candle.parsed_timestamp().map_err(|e| e.at(i))?;
            if let Some((prev_ts, prev_raw)) = previous {
                if ts < prev_ts {
                    return Err(CandleError::OutOfOrder {
                        index: i,
                        timestamp: candle.timestamp.clone(),
                        previous: String::from(prev_raw),
                    });
                }
            }
            previous = Some((ts, candle.timestamp.as_str()));
        }
        Ok(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn first(&self) -> Option<&Candle> {
        self.candles.first()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}

impl TryFrom<Vec<Candle>> for CandleSeries {
    type Error = CandleError;

    fn try_from(candles: Vec<Candle>) -> Result<Self, Self::Error> {
        Self::new(candles)
    }
}

impl From<CandleSeries> for Vec<Candle> {
    fn from(series: CandleSeries) -> Self {
        series.candles
    }
}

impl AsRef<[Candle]> for CandleSeries {
    fn as_ref(&self) -> &[Candle] {
        &self.candles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(ts: &str, close: f64) -> Candle {
        Candle::new(ts, close, close + 1.0, close - 1.0, close, 1000.0)
    }

    #[test]
    fn accepts_ordered_candles() {
        let series = CandleSeries::new(vec![
            candle("2024-01-02 09:15", 100.0),
            candle("2024-01-02 09:20", 101.0),
            candle("2024-01-02 09:20", 102.0),
        ])
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![100.0, 101.0, 102.0]);
    }

    #[test]
    fn empty_series_is_valid() {
        let series = CandleSeries::new(Vec::new()).unwrap();
        assert!(series.is_empty());
        assert!(series.last().is_none());
    }

    #[test]
    fn rejects_out_of_order() {
        let err = CandleSeries::new(vec![
            candle("2024-01-02 09:20", 100.0),
            candle("2024-01-02 09:15", 101.0),
        ])
        .unwrap_err();
        assert!(matches!(err, CandleError::OutOfOrder { index: 1, .. }));
    }

    #[test]
    fn reports_index_of_bad_candle() {
        let mut bad = candle("2024-01-02 09:20", 100.0);
        bad.high = 50.0;
        let err = CandleSeries::new(vec![candle("2024-01-02 09:15", 100.0), bad]).unwrap_err();
        assert!(matches!(err, CandleError::HighBelowLow { index: Some(1), .. }));
    }

    #[test]
    fn rejects_unparsable_timestamp() {
        let err = CandleSeries::new(vec![candle("not a time", 100.0)]).unwrap_err();
        assert!(matches!(err, CandleError::InvalidTimestamp { index: Some(0), .. }));
    }

    #[test]
    fn deserializes_from_tuple_array() {
        let json = r#"[
            ["2024-01-02 09:15", 100.0, 101.0, 99.0, 100.5, 1200],
            ["2024-01-02 09:20", 100.5, 102.0, 100.0, 101.5, 900]
        ]"#;
        let series: CandleSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.volumes(), vec![1200.0, 900.0]);
    }

    #[test]
    fn deserialization_enforces_invariants() {
        let json = r#"[["2024-01-02 09:15", 100.0, 90.0, 99.0, 100.5, 1200]]"#;
        assert!(serde_json::from_str::<CandleSeries>(json).is_err());
    }
}
