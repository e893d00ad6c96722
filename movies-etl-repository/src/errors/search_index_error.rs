//! Search index error types.
//!
//! This module defines the error types that can occur during search index operations.

use thiserror::Error;

/// Errors that can occur during search index operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// The search engine could not be reached, timed out or is temporarily unavailable.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The bulk request as a whole was rejected.
    #[error("Bulk operation error: {0}")]
    BulkOperationError(String),

    /// The response did not have the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A document could not be serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error (e.g., malformed endpoint URL).
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a bulk operation error.
    pub fn bulk_operation(msg: impl Into<String>) -> Self {
        Self::BulkOperationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Whether the failure is worth retrying with backoff.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}
