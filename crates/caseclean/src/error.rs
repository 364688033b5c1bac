//! Error types for the caseclean library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for caseclean operations.
#[derive(Debug, Error)]
pub enum CleanError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to check.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// An operation referenced a column absent from the table.
    #[error("Column not found: '{0}'")]
    ColumnNotFound(String),

    /// An operation was called before a step it depends on.
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// Imputation invoked with no non-null source values.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A month specifier did not match the accepted `YYYY-MM` pattern.
    #[error("Invalid month format: '{input}' (expected YYYY-MM)")]
    MonthFormat { input: String },

    /// A month range's start is strictly after its end.
    #[error("Invalid month range: start {start} is after end {end}")]
    MonthRange { start: String, end: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for caseclean operations.
pub type Result<T> = std::result::Result<T, CleanError>;
