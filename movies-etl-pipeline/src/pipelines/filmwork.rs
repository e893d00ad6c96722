use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use super::enrichment::enrich_filmworks;
use super::{EntityPipeline, PipelineContext};
use crate::aggregator::{AggregateStats, Batch, BatchSink};
use crate::errors::PipelineError;
use movies_etl_repository::BatchOperationSummary;
use movies_etl_shared::EntityKind;

/// Indexes filmworks changed directly or through a linked genre or person.
pub struct FilmworkPipeline {
    context: PipelineContext,
}

impl FilmworkPipeline {
    pub fn new(context: PipelineContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl EntityPipeline for FilmworkPipeline {
    fn kind(&self) -> EntityKind {
        EntityKind::Filmwork
    }

    async fn get_changed_ids(
        &self,
        since: Option<DateTime<Utc>>,
        sink: &mut dyn BatchSink,
    ) -> Result<AggregateStats, PipelineError> {
        self.context
            .aggregator
            .aggregate(EntityKind::Filmwork, since, sink)
            .await
    }

    #[instrument(skip(self, batch), fields(count = batch.len()))]
    async fn update_index(&self, batch: &Batch) -> Result<BatchOperationSummary, PipelineError> {
        let source = &self.context.source;

        let filmworks = source.read_filmworks(&batch.ids).await?;
        let participants = source.read_filmwork_participants(&batch.ids).await?;
        let genres = source.read_filmwork_genres(&batch.ids).await?;

        debug!(
            filmworks = filmworks.len(),
            participants = participants.len(),
            genres = genres.len(),
            "Fetched filmworks with related records"
        );

        let documents = enrich_filmworks(filmworks, participants, genres)?;
        self.context.loader.accept(documents).await
    }
}
