//! Error types for foyerweb-core
//!
//! The computation pipeline itself is total and never fails; these
//! errors cover validation of incoming sheet payloads before they are
//! persisted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoreErrorCode {
    /// Year outside the supported range
    InvalidYear,
    /// Month outside 1-12
    InvalidMonth,
    /// Negative amount on a salary, charge, or budget line
    NegativeAmount,
    /// Empty required label
    EmptyLabel,
}

impl std::fmt::Display for CoreErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreErrorCode::InvalidYear => write!(f, "INVALID_YEAR"),
            CoreErrorCode::InvalidMonth => write!(f, "INVALID_MONTH"),
            CoreErrorCode::NegativeAmount => write!(f, "NEGATIVE_AMOUNT"),
            CoreErrorCode::EmptyLabel => write!(f, "EMPTY_LABEL"),
        }
    }
}

/// Validation error for sheet payloads
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid year: {year} (expected 2000-2100)")]
    InvalidYear { year: i32 },

    #[error("Invalid month: {month} (expected 1-12)")]
    InvalidMonth { month: u32 },

    #[error("Negative amount on {line}: {amount}")]
    NegativeAmount { line: String, amount: String },

    #[error("Empty label on {line}")]
    EmptyLabel { line: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> CoreErrorCode {
        match self {
            CoreError::InvalidYear { .. } => CoreErrorCode::InvalidYear,
            CoreError::InvalidMonth { .. } => CoreErrorCode::InvalidMonth,
            CoreError::NegativeAmount { .. } => CoreErrorCode::NegativeAmount,
            CoreError::EmptyLabel { .. } => CoreErrorCode::EmptyLabel,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
