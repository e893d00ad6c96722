//! Per-entity-kind pipelines.
//!
//! Each pipeline knows how to find the entities of its kind that changed and
//! how to turn a batch of their ids into index documents. The filmwork
//! pipeline additionally enriches its documents with genres and participants.

mod enrichment;
mod filmwork;
mod genre;
mod person;

pub use enrichment::enrich_filmworks;
pub use filmwork::FilmworkPipeline;
pub use genre::GenrePipeline;
pub use person::PersonPipeline;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::aggregator::{AggregateStats, AggregatorConfig, Batch, BatchSink, ChangeAggregator};
use crate::errors::PipelineError;
use crate::loader::SearchLoader;
use movies_etl_repository::{BatchOperationSummary, SourceReader};
use movies_etl_shared::EntityKind;

/// Synchronization of one entity kind.
#[async_trait]
pub trait EntityPipeline: Send + Sync {
    /// The kind of entity this pipeline indexes.
    fn kind(&self) -> EntityKind;

    /// Push batches of ids changed after `since` into `sink`.
    async fn get_changed_ids(
        &self,
        since: Option<DateTime<Utc>>,
        sink: &mut dyn BatchSink,
    ) -> Result<AggregateStats, PipelineError>;

    /// Fetch the current state of every entity in `batch` and write it to the index.
    async fn update_index(&self, batch: &Batch) -> Result<BatchOperationSummary, PipelineError>;
}

/// The components every pipeline reads from and writes to.
#[derive(Clone)]
pub struct PipelineContext {
    pub source: Arc<dyn SourceReader>,
    pub aggregator: Arc<ChangeAggregator>,
    pub loader: Arc<SearchLoader>,
}

impl PipelineContext {
    pub fn new(
        source: Arc<dyn SourceReader>,
        loader: Arc<SearchLoader>,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            aggregator: Arc::new(ChangeAggregator::with_config(source.clone(), config)),
            source,
            loader,
        }
    }
}

/// One pipeline per entity kind, in the order a beat runs them.
pub fn default_pipelines(context: PipelineContext) -> Vec<Box<dyn EntityPipeline>> {
    vec![
        Box::new(GenrePipeline::new(context.clone())),
        Box::new(PersonPipeline::new(context.clone())),
        Box::new(FilmworkPipeline::new(context)),
    ]
}
