//! Change aggregator.
//!
//! Pages through every change axis of an entity kind, deduplicates the ids and
//! pushes them downstream in batches of the configured chunk size.

mod batcher;

pub use batcher::{Batch, ChangeBatcher};

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use crate::errors::PipelineError;
use movies_etl_repository::SourceReader;
use movies_etl_shared::{ChangeId, EntityKind};

/// Default number of ids per page and per batch.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Configuration for the change aggregator.
#[derive(Debug, Clone, Copy)]
pub struct AggregatorConfig {
    /// Page size for change queries and upper bound of a batch.
    pub chunk_size: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Receiver of the batches produced by the aggregator.
#[async_trait]
pub trait BatchSink: Send {
    async fn accept(&mut self, batch: Batch) -> Result<(), PipelineError>;
}

/// Counters for one aggregation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    /// Ids returned by the change queries, duplicates included.
    pub reported: usize,
    /// Distinct ids pushed downstream.
    pub distinct: usize,
    /// Batches pushed downstream.
    pub batches: usize,
}

/// Turns the change axes of an entity kind into deduplicated batches.
pub struct ChangeAggregator {
    source: Arc<dyn SourceReader>,
    config: AggregatorConfig,
}

impl ChangeAggregator {
    pub fn new(source: Arc<dyn SourceReader>) -> Self {
        Self {
            source,
            config: AggregatorConfig::default(),
        }
    }

    pub fn with_config(source: Arc<dyn SourceReader>, config: AggregatorConfig) -> Self {
        Self { source, config }
    }

    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size.max(1)
    }

    /// Drain every axis of `kind` changed after `since` into `sink`.
    ///
    /// Axes are read in priority order, each until an empty page. Full batches
    /// are pushed as soon as they fill up and the remainder once all axes are
    /// exhausted.
    #[instrument(skip(self, since, sink), fields(kind = %kind))]
    pub async fn aggregate(
        &self,
        kind: EntityKind,
        since: Option<DateTime<Utc>>,
        sink: &mut dyn BatchSink,
    ) -> Result<AggregateStats, PipelineError> {
        let chunk_size = self.chunk_size();
        let mut batcher = ChangeBatcher::new(kind, chunk_size);
        let mut stats = AggregateStats::default();

        for axis in kind.axes() {
            let mut offset = 0;
            loop {
                let ids = self
                    .source
                    .read_changed_ids(*axis, since, offset, chunk_size)
                    .await?;
                if ids.is_empty() {
                    break;
                }

                debug!(axis = %axis, offset, count = ids.len(), "Read changed ids");
                offset += ids.len();
                stats.reported += ids.len();

                for id in ids {
                    if let Some(batch) = batcher.push(ChangeId::new(id, axis.entity_kind())) {
                        stats.batches += 1;
                        sink.accept(batch).await?;
                    }
                }
            }
        }

        if let Some(batch) = batcher.finish() {
            stats.batches += 1;
            sink.accept(batch).await?;
        }

        stats.distinct = batcher.distinct();
        Ok(stats)
    }
}
