//! Search index provider trait definition.
//!
//! This module defines the abstract interface for raw bulk operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::{BatchOperationResult, BulkItem};

/// Abstracts the underlying search index implementation (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are injected into `SearchIndexClient`, which layers the
/// create-then-update policy and retries on top of these single bulk calls.
///
/// A per-document failure is reported inside the returned results. An `Err`
/// means the bulk call as a whole failed.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Create documents in bulk. Existing documents are left untouched and
    /// reported as conflicts.
    ///
    /// # Arguments
    ///
    /// * `index` - Name of the target index
    /// * `items` - Documents keyed by entity id
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<BatchOperationResult>)` - One result per item, in input order
    /// * `Err(SearchIndexError)` - If the bulk request fails entirely
    async fn bulk_create(
        &self,
        index: &str,
        items: &[BulkItem],
    ) -> Result<Vec<BatchOperationResult>, SearchIndexError>;

    /// Replace documents in bulk with the given bodies.
    ///
    /// Each stored document is overwritten as a whole; fields missing from the
    /// new body do not survive.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<BatchOperationResult>)` - One result per item, in input order
    /// * `Err(SearchIndexError)` - If the bulk request fails entirely
    async fn bulk_update(
        &self,
        index: &str,
        items: &[BulkItem],
    ) -> Result<Vec<BatchOperationResult>, SearchIndexError>;

    /// Check if the search engine is healthy and reachable.
    async fn health_check(&self) -> Result<bool, SearchIndexError>;
}
