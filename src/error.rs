//! Custom error types for the cashflow report engine
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for cashflow report operations
#[derive(Error, Debug)]
pub enum CashflowError {
    /// A source record could not be turned into a transaction.
    ///
    /// The whole generation run is rejected; `index` is the zero-based
    /// position of the offending record in the input list.
    #[error("Malformed transaction at record {index}: {reason} [{record}]")]
    MalformedTransaction {
        index: usize,
        reason: String,
        record: String,
    },

    /// A total left the representable range of `Money`
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    /// Invalid user-supplied arguments
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Import errors (unreadable source files)
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl CashflowError {
    /// Create a malformed transaction error for the record at `index`
    pub fn malformed(index: usize, reason: impl Into<String>, record: impl Into<String>) -> Self {
        Self::MalformedTransaction {
            index,
            reason: reason.into(),
            record: record.into(),
        }
    }

    /// Check if this is a malformed transaction error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedTransaction { .. })
    }
}

impl From<std::io::Error> for CashflowError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CashflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for CashflowError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for cashflow report operations
pub type CashflowResult<T> = Result<T, CashflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CashflowError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_malformed_error() {
        let err = CashflowError::malformed(3, "missing date", "account=Rent amount=800.00");
        assert_eq!(
            err.to_string(),
            "Malformed transaction at record 3: missing date [account=Rent amount=800.00]"
        );
        assert!(err.is_malformed());
    }

    #[test]
    fn test_overflow_error_display() {
        let err = CashflowError::AmountOverflow("total inflows".into());
        assert_eq!(err.to_string(), "Amount overflow: total inflows");
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CashflowError = io_err.into();
        assert!(matches!(err, CashflowError::Io(_)));
        assert!(!err.is_malformed());
    }
}
