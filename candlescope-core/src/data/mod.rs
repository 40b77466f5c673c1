//! Candle loading: provider trait, file-backed providers, error types.

pub mod csv;
pub mod json;
pub mod provider;

use std::path::Path;

pub use self::csv::{read_candles_csv, CsvFileProvider};
pub use json::{parse_candles_json, JsonFileProvider};
pub use provider::{CandleProvider, DataError, StaticProvider};

/// Pick a file provider from the extension: `.csv` is CSV, anything else JSON.
pub fn provider_for_path(path: &Path) -> Box<dyn CandleProvider> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        Box::new(CsvFileProvider::new(path))
    } else {
        Box::new(JsonFileProvider::new(path))
    }
}
