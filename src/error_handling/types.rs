//! Error type definitions.
//!
//! This module defines the error types used by the record pipeline, the staging
//! store and application start-up.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for staging store operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// A staged row could not be decoded back into a record.
    #[error("Staged row {line_no} could not be decoded: {source}")]
    DecodeError {
        /// Line ordinal stored alongside the row
        line_no: i64,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },
}

/// Errors raised while extracting, transforming or loading records.
#[derive(Error, Debug)]
pub enum EtlError {
    /// A record carried fewer positional fields than the transformer needs.
    ///
    /// `line` is the zero-based position of the record within its batch or file.
    #[error("Malformed record at line {line}: expected at least {expected} fields, found {found}")]
    MalformedRecord {
        /// Zero-based record position
        line: usize,
        /// Minimum number of fields required
        expected: usize,
        /// Number of fields actually present
        found: usize,
    },

    /// Reading or writing CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error (open, create, flush).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Staging store failure.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// A transform worker panicked or was cancelled before returning.
    #[error("Worker {index} failed: {message}")]
    Worker {
        /// Submission index of the failed worker
        index: usize,
        /// Join error description
        message: String,
    },
}

impl EtlError {
    /// Returns a short, stable name for the error category.
    ///
    /// Tags the error log line of a failed strategy run.
    pub fn as_str(&self) -> &'static str {
        match self {
            EtlError::MalformedRecord { .. } => "malformed record",
            EtlError::Csv(_) => "csv error",
            EtlError::Io(_) => "io error",
            EtlError::Database(_) => "staging store error",
            EtlError::Worker { .. } => "worker failure",
        }
    }

    /// Returns the positional line for record-level errors.
    #[cfg(test)]
    pub(crate) fn line(&self) -> Option<usize> {
        match self {
            EtlError::MalformedRecord { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for EtlError {
    fn from(e: sqlx::Error) -> Self {
        EtlError::Database(DatabaseError::SqlError(e))
    }
}
