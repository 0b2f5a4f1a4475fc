//! Store error types
//!
//! Defines all errors that can occur while ingesting, persisting and
//! querying postcards.

use thiserror::Error;

/// Why a single line could not be read as a postcard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Fewer than the three `;`-terminated fields were present
    #[error("expected `date: ...; from: ...; to: ...; ...`, found {found} field(s)")]
    MissingFields { found: usize },

    /// A field had no `:` between its label and value
    #[error("field `{field}` has no `:` separator")]
    MissingSeparator { field: &'static str },

    /// A field carried the wrong label (e.g. `form:` instead of `from:`)
    #[error("expected field `{expected}`, found `{found}`")]
    UnexpectedLabel {
        expected: &'static str,
        found: String,
    },

    /// The date is not a valid `YYYY-MM-DD` calendar date
    #[error("invalid date `{value}`, expected YYYY-MM-DD")]
    InvalidDate { value: String },
}

/// Errors that can occur in the postcard store
#[derive(Error, Debug)]
pub enum StoreError {
    /// A line of input does not have the postcard shape
    #[error("Format error on line {line}: {source} (in {raw:?})")]
    Format {
        /// 1-based line number within the ingested text
        line: usize,
        /// The offending line, verbatim
        raw: String,
        #[source]
        source: RecordError,
    },

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Line number of a format error, `None` for I/O failures
    pub fn line(&self) -> Option<usize> {
        match self {
            StoreError::Format { line, .. } => Some(*line),
            StoreError::Io(_) => None,
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
