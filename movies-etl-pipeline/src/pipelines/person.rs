use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use super::{EntityPipeline, PipelineContext};
use crate::aggregator::{AggregateStats, Batch, BatchSink};
use crate::errors::PipelineError;
use movies_etl_repository::BatchOperationSummary;
use movies_etl_shared::{EntityKind, PersonDocument};

/// Indexes modified persons.
pub struct PersonPipeline {
    context: PipelineContext,
}

impl PersonPipeline {
    pub fn new(context: PipelineContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl EntityPipeline for PersonPipeline {
    fn kind(&self) -> EntityKind {
        EntityKind::Person
    }

    async fn get_changed_ids(
        &self,
        since: Option<DateTime<Utc>>,
        sink: &mut dyn BatchSink,
    ) -> Result<AggregateStats, PipelineError> {
        self.context
            .aggregator
            .aggregate(EntityKind::Person, since, sink)
            .await
    }

    #[instrument(skip(self, batch), fields(count = batch.len()))]
    async fn update_index(&self, batch: &Batch) -> Result<BatchOperationSummary, PipelineError> {
        let rows = self.context.source.read_persons(&batch.ids).await?;
        if rows.len() < batch.len() {
            debug!(missing = batch.len() - rows.len(), "Persons vanished before fetch");
        }

        let documents: Vec<PersonDocument> = rows.into_iter().map(PersonDocument::from).collect();
        self.context.loader.accept(documents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::AggregatorConfig;
    use crate::loader::SearchLoader;
    use crate::test_support::{person_row, MockSource, MockWriter};
    use movies_etl_shared::ChangeAxis;
    use serde_json::json;
    use std::sync::Arc;

    struct IndexingSink<'a> {
        pipeline: &'a PersonPipeline,
        written: usize,
    }

    #[async_trait]
    impl<'a> BatchSink for IndexingSink<'a> {
        async fn accept(&mut self, batch: Batch) -> Result<(), PipelineError> {
            self.written += self.pipeline.update_index(&batch).await?.succeeded;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_changed_persons_are_indexed_with_full_name() {
        let ann = person_row("Ann", "Lee");
        let bob = person_row("Bob", "Ray");
        let source = Arc::new(
            MockSource {
                persons: vec![ann.clone(), bob.clone()],
                ..Default::default()
            }
            .with_changes(ChangeAxis::Person, vec![ann.id, bob.id]),
        );
        let writer = Arc::new(MockWriter::default());
        let pipeline = PersonPipeline::new(PipelineContext::new(
            source,
            Arc::new(SearchLoader::new(writer.clone())),
            AggregatorConfig { chunk_size: 1 },
        ));
        let mut sink = IndexingSink {
            pipeline: &pipeline,
            written: 0,
        };

        let stats = pipeline.get_changed_ids(None, &mut sink).await.unwrap();

        assert_eq!(stats.batches, 2);
        assert_eq!(sink.written, 2);
        assert_eq!(writer.calls_for("persons"), vec![vec![ann.id], vec![bob.id]]);
        assert_eq!(
            writer.document("persons", bob.id),
            Some(json!({"id": bob.id, "full_name": "Bob Ray"}))
        );
    }
}
