//! Custom error types for passbook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for passbook operations
#[derive(Error, Debug)]
pub enum PassbookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for operator input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed ledger file
    #[error("Parse error at row {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Entry date earlier than the last recorded entry
    #[error("Entries must be chronological: {date} is earlier than the last entry ({last})")]
    Chronology { date: String, last: String },

    /// Action code that is neither deposit nor withdraw
    #[error("Unsupported action: '{0}' (expected deposit or withdraw)")]
    UnsupportedAction(String),

    /// Ledger file held open by another program
    #[error("Ledger file is locked: {}", .0.display())]
    FileLocked(PathBuf),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Chart rendering errors
    #[error("Report error: {0}")]
    Report(String),
}

impl PassbookError {
    /// Create a parse error for a given (1-based, header excluded) row
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// Check if this is a chronology error
    pub fn is_chronology(&self) -> bool {
        matches!(self, Self::Chronology { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Check if the ledger file was locked
    pub fn is_file_locked(&self) -> bool {
        matches!(self, Self::FileLocked(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for PassbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PassbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for PassbookError {
    fn from(err: csv::Error) -> Self {
        let line = err
            .position()
            .map(|pos| pos.line().saturating_sub(1) as usize)
            .unwrap_or(0);
        Self::parse(line, err.to_string())
    }
}

/// Result type alias for passbook operations
pub type PassbookResult<T> = Result<T, PassbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PassbookError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_chronology_error() {
        let err = PassbookError::Chronology {
            date: "24-12-31".into(),
            last: "25-01-01".into(),
        };
        assert_eq!(
            err.to_string(),
            "Entries must be chronological: 24-12-31 is earlier than the last entry (25-01-01)"
        );
        assert!(err.is_chronology());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_parse_error() {
        let err = PassbookError::parse(3, "missing TAG column");
        assert_eq!(err.to_string(), "Parse error at row 3: missing TAG column");
        assert!(err.is_parse());
    }

    #[test]
    fn test_file_locked_error() {
        let err = PassbookError::FileLocked(PathBuf::from("/tmp/ledger.csv"));
        assert!(err.is_file_locked());
        assert!(err.to_string().contains("/tmp/ledger.csv"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PassbookError = io_err.into();
        assert!(matches!(err, PassbookError::Io(_)));
    }
}
