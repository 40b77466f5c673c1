//! JSON candle files.
//!
//! Two shapes are accepted:
//! - a bare array of `[timestamp, open, high, low, close, volume]` tuples
//! - the broker response envelope `{ status, message, errorcode, data }`,
//!   where a missing or null `data` means the broker refused the request

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::provider::{CandleProvider, DataError};
use crate::domain::{Candle, CandleSeries};

#[derive(Debug, Deserialize)]
struct BrokerEnvelope {
    #[serde(default)]
    status: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    errorcode: String,
    data: Option<Vec<Candle>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CandleDocument {
    Bare(Vec<Candle>),
    Envelope(BrokerEnvelope),
}

/// Parse a JSON document in either accepted shape.
pub fn parse_candles_json(content: &str, path: &Path) -> Result<CandleSeries, DataError> {
    let doc: CandleDocument = serde_json::from_str(content).map_err(|e| DataError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let candles = match doc {
        CandleDocument::Bare(candles) => candles,
        CandleDocument::Envelope(env) => match env.data {
            Some(candles) => {
                if !env.status {
                    warn!(path = %path.display(), message = %env.message, "envelope status false but data present");
                }
                candles
            }
            None => {
                return Err(DataError::Rejected {
                    message: env.message,
                    error_code: env.errorcode,
                })
            }
        },
    };

    debug!(path = %path.display(), candles = candles.len(), "parsed json candles");
    Ok(CandleSeries::new(candles)?)
}

#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CandleProvider for JsonFileProvider {
    fn name(&self) -> &str {
        "json-file"
    }

    fn fetch(&self) -> Result<CandleSeries, DataError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| DataError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_candles_json(&content, &self.path)
    }
}
