//! Error types for the movies ETL pipeline.

use movies_etl_repository::{SearchIndexError, SourceError, StateError};
use thiserror::Error;

/// Errors that abort a beat.
///
/// Transient connectivity failures never show up here: the source and index
/// clients retry them. Everything that reaches the orchestrator is fatal.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from the relational source.
    #[error("Source error: {0}")]
    SourceError(#[from] SourceError),

    /// Error from the search index.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] SearchIndexError),

    /// Error persisting the watermark.
    #[error("State error: {0}")]
    StateError(#[from] StateError),

    /// Related records could not be attached to a document.
    #[error("Enrichment error: {0}")]
    EnrichmentError(String),
}

impl PipelineError {
    /// Create an enrichment error.
    pub fn enrichment(msg: impl Into<String>) -> Self {
        Self::EnrichmentError(msg.into())
    }
}
