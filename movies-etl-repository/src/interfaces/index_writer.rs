//! Index writer trait definition.

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::{BatchOperationSummary, BulkItem};

/// Idempotent bulk writes into the search index.
///
/// This is the seam the pipeline writes through; `SearchIndexClient` is the
/// production implementation.
#[async_trait]
pub trait IndexWriter: Send + Sync {
    /// Create or fully replace every item in `index`.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Per-document outcome, in input order
    /// * `Err(SearchIndexError)` - If the write failed in a way that should abort the beat
    async fn bulk_upsert(
        &self,
        index: &str,
        items: Vec<BulkItem>,
    ) -> Result<BatchOperationSummary, SearchIndexError>;
}
