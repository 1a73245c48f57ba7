//! Error types for loss data preparation

use thiserror::Error;

/// Errors raised while preparing triangle data
///
/// Every error aborts the whole call: floor adjustments and triangle cells are
/// defined over full columns, so there is no partial result to recover.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("schema error: {0}")]
    Schema(String),

    #[error("column length mismatch: '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("negative development age at row {row}: origin {origin}, quarter {quarter} gives {age_months} months for accounting year {accounting_year}")]
    NegativeAge {
        row: usize,
        origin: i64,
        quarter: i64,
        accounting_year: i64,
        age_months: i64,
    },

    #[error("development age overflows at row {row}: origin {origin}, quarter {quarter}, accounting year {accounting_year}")]
    AgeOverflow {
        row: usize,
        origin: i64,
        quarter: i64,
        accounting_year: i64,
    },

    #[error("expected exactly one full-year premium row for line '{line_of_business}' and year {accounting_year}, found {matches}")]
    PremiumNotFound {
        line_of_business: String,
        accounting_year: i64,
        matches: usize,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("divisor has {divisor_len} entries but matrix has {columns} columns")]
    DimensionMismatch { columns: usize, divisor_len: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PrepResult<T> = Result<T, PrepError>;
