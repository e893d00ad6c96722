//! Loader module for the movies ETL pipeline.
//!
//! Writes assembled documents into the search index.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::PipelineError;
use movies_etl_repository::{BatchOperationSummary, BulkItem, IndexWriter};
use movies_etl_shared::IndexDocument;

/// Loader that writes batches of documents into the index of their kind.
///
/// Documents the index rejects are reported in the returned summary and
/// logged by the writer; only errors of the bulk call itself are returned as
/// `Err`.
pub struct SearchLoader {
    writer: Arc<dyn IndexWriter>,
}

impl SearchLoader {
    /// Create a new search loader with the given writer.
    pub fn new(writer: Arc<dyn IndexWriter>) -> Self {
        Self { writer }
    }

    /// Write one batch of documents.
    #[instrument(skip(self, documents), fields(kind = %D::KIND, count = documents.len()))]
    pub async fn accept<D: IndexDocument>(
        &self,
        documents: Vec<D>,
    ) -> Result<BatchOperationSummary, PipelineError> {
        if documents.is_empty() {
            return Ok(BatchOperationSummary::default());
        }

        let index = D::KIND.index_name();
        let items = documents
            .iter()
            .map(BulkItem::from_document)
            .collect::<Result<Vec<_>, _>>()?;

        let summary = self.writer.bulk_upsert(index, items).await?;

        info!(
            index = %index,
            updated = summary.succeeded,
            failed = summary.failed,
            "Updated index"
        );

        Ok(summary)
    }
}
