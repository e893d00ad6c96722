use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use super::{EntityPipeline, PipelineContext};
use crate::aggregator::{AggregateStats, Batch, BatchSink};
use crate::errors::PipelineError;
use movies_etl_repository::BatchOperationSummary;
use movies_etl_shared::{EntityKind, GenreDocument};

/// Indexes modified genres.
pub struct GenrePipeline {
    context: PipelineContext,
}

impl GenrePipeline {
    pub fn new(context: PipelineContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl EntityPipeline for GenrePipeline {
    fn kind(&self) -> EntityKind {
        EntityKind::Genre
    }

    async fn get_changed_ids(
        &self,
        since: Option<DateTime<Utc>>,
        sink: &mut dyn BatchSink,
    ) -> Result<AggregateStats, PipelineError> {
        self.context
            .aggregator
            .aggregate(EntityKind::Genre, since, sink)
            .await
    }

    #[instrument(skip(self, batch), fields(count = batch.len()))]
    async fn update_index(&self, batch: &Batch) -> Result<BatchOperationSummary, PipelineError> {
        let rows = self.context.source.read_genres(&batch.ids).await?;
        if rows.len() < batch.len() {
            debug!(missing = batch.len() - rows.len(), "Genres vanished before fetch");
        }

        let documents: Vec<GenreDocument> = rows.into_iter().map(GenreDocument::from).collect();
        self.context.loader.accept(documents).await
    }
}
