//! Search index client implementation.
//!
//! This module provides the client the pipeline writes through. It turns the
//! provider's raw bulk create and bulk update calls into an idempotent bulk
//! upsert and retries connectivity failures of each bulk call.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, error, instrument};

use crate::errors::SearchIndexError;
use crate::interfaces::{IndexWriter, SearchIndexProvider};
use crate::retry::RetryPolicy;
use crate::types::{BatchOperationResult, BatchOperationSummary, BulkItem};
use movies_etl_shared::EntityId;

/// The main client for writing documents into the search index.
pub struct SearchIndexClient {
    provider: Box<dyn SearchIndexProvider>,
    retry: RetryPolicy,
}

impl SearchIndexClient {
    /// Create a new SearchIndexClient with the default retry policy.
    pub fn new(provider: Box<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            retry: RetryPolicy::default(),
        }
    }

    /// Create a new SearchIndexClient with a custom retry policy.
    pub fn with_retry(provider: Box<dyn SearchIndexProvider>, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    /// Check if the search engine is healthy.
    pub async fn health_check(&self) -> Result<bool, SearchIndexError> {
        self.retry
            .run(|| self.provider.health_check(), SearchIndexError::is_transient)
            .await
    }

    async fn create_with_retry(
        &self,
        index: &str,
        items: &[BulkItem],
    ) -> Result<Vec<BatchOperationResult>, SearchIndexError> {
        self.retry
            .run(
                || self.provider.bulk_create(index, items),
                SearchIndexError::is_transient,
            )
            .await
    }

    async fn update_with_retry(
        &self,
        index: &str,
        items: &[BulkItem],
    ) -> Result<Vec<BatchOperationResult>, SearchIndexError> {
        self.retry
            .run(
                || self.provider.bulk_update(index, items),
                SearchIndexError::is_transient,
            )
            .await
    }
}

#[async_trait]
impl IndexWriter for SearchIndexClient {
    /// Create every item, then overwrite the ones that already existed.
    ///
    /// Only creates rejected with "document already exists" fall back to an
    /// update. Any other per-document error is final for that document and is
    /// logged; the rest of the batch is unaffected.
    #[instrument(skip(self, items), fields(index = %index, count = items.len()))]
    async fn bulk_upsert(
        &self,
        index: &str,
        items: Vec<BulkItem>,
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        if items.is_empty() {
            return Ok(BatchOperationSummary::default());
        }

        let created = self.create_with_retry(index, &items).await?;

        let conflicting: Vec<EntityId> = created
            .iter()
            .filter(|r| r.error.as_ref().is_some_and(|e| e.is_already_exists()))
            .map(|r| r.entity_id)
            .collect();

        let results = if conflicting.is_empty() {
            created
        } else {
            let to_update: Vec<BulkItem> = items
                .into_iter()
                .filter(|item| conflicting.contains(&item.entity_id))
                .collect();

            debug!(count = to_update.len(), "Updating documents that already exist");

            let mut updated: HashMap<EntityId, BatchOperationResult> = self
                .update_with_retry(index, &to_update)
                .await?
                .into_iter()
                .map(|r| (r.entity_id, r))
                .collect();

            created
                .into_iter()
                .map(|r| updated.remove(&r.entity_id).unwrap_or(r))
                .collect()
        };

        let summary = BatchOperationSummary::from_results(results);

        for failure in summary.failures() {
            if let Some(err) = &failure.error {
                error!(
                    index = %index,
                    entity_id = %failure.entity_id,
                    error = %err,
                    "Failed to write document"
                );
            }
        }

        Ok(summary)
    }
}
