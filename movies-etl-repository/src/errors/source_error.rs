//! Relational source error types.

use thiserror::Error;

/// Errors that can occur while reading from the relational source.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The database could not be reached or dropped the connection.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The database rejected the query.
    #[error("Query error: {0}")]
    QueryError(String),

    /// A row did not match the expected schema.
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// The connection settings are invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl SourceError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Whether the failure is worth retrying with backoff.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}

impl From<sqlx::Error> for SourceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::ConnectionError(err.to_string()),
            sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => Self::DecodeError(err.to_string()),
            sqlx::Error::Configuration(_) => Self::ConfigurationError(err.to_string()),
            _ => Self::QueryError(err.to_string()),
        }
    }
}
