//! Custom error types for the expense ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Date did not parse as a `YYYY-MM-DD` calendar date
    #[error("Invalid date format! Use YYYY-MM-DD. (got '{0}')")]
    InvalidDate(String),

    /// Amount did not parse as a finite decimal number
    #[error("Amount must be a number! (got '{0}')")]
    InvalidAmount(String),

    /// A required field was empty
    #[error("Please fill all the fields! ({0} is empty)")]
    MissingField(&'static str),

    /// Category text cannot be stored in the ledger file
    #[error("Invalid category '{0}': must not contain commas or line breaks")]
    InvalidCategory(String),

    /// Nothing was selected, or a requested row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any I/O failure while reading or writing ledger files
    #[error("Storage error: {0}")]
    Storage(String),

    /// A ledger line could not be parsed
    #[error("Malformed ledger line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// A total fell outside the representable range
    #[error("Total out of range: {0}")]
    Overflow(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors for JSON/YAML exports
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error came from validating user input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate(_)
                | Self::InvalidAmount(_)
                | Self::MissingField(_)
                | Self::InvalidCategory(_)
        )
    }

    /// Check if this is a storage-level failure
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Malformed { .. })
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<serde_yaml::Error> for LedgerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
