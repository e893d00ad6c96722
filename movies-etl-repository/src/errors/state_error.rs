//! State storage error types.

use thiserror::Error;

/// Errors that can occur while persisting or loading the ETL state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The state file could not be read or written.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The state could not be serialized.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
