//! Custom error types for ledger-report
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// A single source that failed to load, kept for end-of-run reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    /// Source name (e.g. "Labour")
    pub source: String,
    /// Human-readable reason
    pub reason: String,
}

impl std::fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.source, self.reason)
    }
}

fn join_failures(failures: &[SourceFailure]) -> String {
    if failures.is_empty() {
        return "no sources configured".to_string();
    }
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The main error type for ledger-report operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// A source could not be loaded at all
    #[error("Failed to load source '{name}': {reason}")]
    SourceLoad { name: String, reason: String },

    /// A source's sheet lacks a column its schema requires
    #[error("Source '{name}' is missing required column {column}")]
    MissingColumn { name: String, column: String },

    /// No source produced a single record
    #[error("No data could be loaded ({})", join_failures(.failures))]
    NoData { failures: Vec<SourceFailure> },

    /// Load policy requires every source and at least one failed
    #[error("Load policy requires all sources, but some failed ({})", join_failures(.failures))]
    PolicyViolation { failures: Vec<SourceFailure> },

    /// Validation errors for input values
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a source load error
    pub fn source_load(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceLoad {
            name: source.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing column error
    pub fn missing_column(source: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            name: source.into(),
            column: column.into(),
        }
    }

    /// Check if this error means the whole run produced nothing
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }

    /// Source failures carried by this error, if any
    pub fn failures(&self) -> &[SourceFailure] {
        match self {
            Self::NoData { failures } | Self::PolicyViolation { failures } => failures,
            _ => &[],
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for ledger-report operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_missing_column_error() {
        let err = LedgerError::missing_column("Labour", "'Withdrawals'");
        assert_eq!(
            err.to_string(),
            "Source 'Labour' is missing required column 'Withdrawals'"
        );
    }

    #[test]
    fn test_no_data_lists_failures() {
        let err = LedgerError::NoData {
            failures: vec![
                SourceFailure {
                    source: "Sales".into(),
                    reason: "sheet not found".into(),
                },
                SourceFailure {
                    source: "Rent".into(),
                    reason: "bad header".into(),
                },
            ],
        };
        assert!(err.is_no_data());
        assert_eq!(err.failures().len(), 2);
        assert_eq!(
            err.to_string(),
            "No data could be loaded (Sales: sheet not found; Rent: bad header)"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
        assert!(ledger_err.failures().is_empty());
    }
}
