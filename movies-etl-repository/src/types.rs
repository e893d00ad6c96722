//! Request and response types for search index operations.

use std::fmt;

use serde_json::Value;

use movies_etl_shared::{EntityId, IndexDocument};

use crate::errors::SearchIndexError;

/// Marker the search engine puts in the reason of a create conflict.
const ALREADY_EXISTS_MARKER: &str = "document already exists";

/// A document ready to be written, keyed by its identity in the index.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItem {
    /// The entity's unique identifier, used as the document id.
    pub entity_id: EntityId,
    /// The full document body.
    pub document: Value,
}

impl BulkItem {
    pub fn new(entity_id: EntityId, document: Value) -> Self {
        Self {
            entity_id,
            document,
        }
    }

    /// Serialize an index document into a bulk item.
    pub fn from_document<D: IndexDocument>(document: &D) -> Result<Self, SearchIndexError> {
        let body = serde_json::to_value(document)
            .map_err(|e| SearchIndexError::serialization(e.to_string()))?;
        Ok(Self::new(document.document_id(), body))
    }
}

/// Error the search engine reported for a single document of a bulk request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentError {
    /// Error classification, e.g. `mapper_parsing_exception`.
    pub kind: String,
    /// Human readable reason.
    pub reason: String,
}

impl DocumentError {
    pub fn new(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Whether a create failed only because the document is already indexed.
    pub fn is_already_exists(&self) -> bool {
        self.reason.contains(ALREADY_EXISTS_MARKER)
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.reason)
    }
}

/// Result of a batch operation for a single item.
///
/// `error` is `None` when the document was written.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOperationResult {
    /// The entity's unique identifier.
    pub entity_id: EntityId,
    /// Error if the operation failed.
    pub error: Option<DocumentError>,
}

impl BatchOperationResult {
    pub fn success(entity_id: EntityId) -> Self {
        Self {
            entity_id,
            error: None,
        }
    }

    pub fn failure(entity_id: EntityId, error: DocumentError) -> Self {
        Self {
            entity_id,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a batch operation containing aggregate statistics and individual results.
///
/// Results are in the order of the submitted items, one per item, so callers
/// can handle partial failures document by document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOperationSummary {
    /// Total number of items in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each item.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    pub fn from_results(results: Vec<BatchOperationResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// Results of the documents that could not be written.
    pub fn failures(&self) -> impl Iterator<Item = &BatchOperationResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}
