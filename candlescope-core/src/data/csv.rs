//! CSV candle files with a `timestamp,open,high,low,close,volume` header.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::provider::{CandleProvider, DataError};
use crate::domain::{Candle, CandleSeries};

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl From<CsvRow> for Candle {
    fn from(row: CsvRow) -> Self {
        Candle::new(row.timestamp, row.open, row.high, row.low, row.close, row.volume)
    }
}

/// Parse headered CSV from any reader. Columns are matched by name.
pub fn read_candles_csv<R: std::io::Read>(reader: R, path: &Path) -> Result<CandleSeries, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let candles = rdr
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(i, row)| {
            row.map(Candle::from).map_err(|e| DataError::Parse {
                path: path.to_path_buf(),
                reason: format!("row {}: {e}", i + 1),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(path = %path.display(), candles = candles.len(), "parsed csv candles");
    Ok(CandleSeries::new(candles)?)
}

#[derive(Debug, Clone)]
pub struct CsvFileProvider {
    path: PathBuf,
}

impl CsvFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CandleProvider for CsvFileProvider {
    fn name(&self) -> &str {
        "csv-file"
    }

    fn fetch(&self) -> Result<CandleSeries, DataError> {
        let file = std::fs::File::open(&self.path).map_err(|source| DataError::Io {
            path: self.path.clone(),
            source,
        })?;
        read_candles_csv(std::io::BufReader::new(file), &self.path)
    }
}
