//! Structured error types for indicator engines.
//!
//! Every engine validates its inputs up front and fails with one of these
//! before doing any work, so a caller never sees a silently truncated series.

use thiserror::Error;

/// Errors raised by indicator engines and the analysis orchestrator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("insufficient data for {indicator}: need {required} values, got {available}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        available: usize,
    },

    #[error("invalid parameter for {indicator}: {reason}")]
    InvalidParameter {
        indicator: &'static str,
        reason: String,
    },

    #[error("{indicator}: base price at index {index} is zero")]
    ZeroBasePrice { indicator: &'static str, index: usize },
}

impl IndicatorError {
    pub(crate) fn invalid(indicator: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            indicator,
            reason: reason.into(),
        }
    }
}

/// Fail with `InsufficientData` unless `available >= required`.
pub(crate) fn require_len(
    indicator: &'static str,
    required: usize,
    available: usize,
) -> Result<(), IndicatorError> {
    if available < required {
        return Err(IndicatorError::InsufficientData {
            indicator,
            required,
            available,
        });
    }
    Ok(())
}

/// Fail with `InvalidParameter` when a period or window is zero.
pub(crate) fn require_period(
    indicator: &'static str,
    name: &str,
    period: usize,
) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::invalid(indicator, format!("{name} must be >= 1")));
    }
    Ok(())
}
