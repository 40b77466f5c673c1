//! Domain types for Candlescope

pub mod candle;
pub mod series;

pub use candle::{parse_timestamp, Candle, CandleError, CandleTuple};
pub use series::CandleSeries;
