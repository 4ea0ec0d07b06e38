//! Error types for the back-office core
//!
//! Nothing here is fatal: store failures surface as values the caller turns
//! into a notification, and report errors only reject bad input.

use thiserror::Error;

/// Document store error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Network failure or store offline
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Credentials rejected or rules deny access
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Collection or record missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record could not be read as the expected shape
    #[error("Malformed record: {0}")]
    Malformed(String),

    /// Fields could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Report input errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: String, end: String },
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;
