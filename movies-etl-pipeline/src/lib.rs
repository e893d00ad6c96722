//! # Movies ETL Pipeline
//!
//! This crate provides the pipeline components that copy changed movies,
//! genres and persons from the relational source into the search index.
//!
//! ## Architecture
//!
//! Each beat pushes data through the same stages for every entity kind:
//!
//! 1. **Aggregator**: Pages through the change axes and batches distinct ids
//! 2. **Pipelines**: Fetch the rows of a batch and assemble documents
//! 3. **Loader**: Writes documents into the index of their kind
//! 4. **Orchestrator**: Runs the pipelines in order and advances the watermark

pub mod aggregator;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod pipelines;

#[cfg(test)]
mod test_support;

pub use aggregator::{AggregatorConfig, Batch, BatchSink, ChangeAggregator};
pub use errors::PipelineError;
pub use loader::SearchLoader;
pub use orchestrator::{BeatReport, BeatState, Orchestrator, OrchestratorConfig, PipelineReport};
pub use pipelines::{
    default_pipelines, EntityPipeline, FilmworkPipeline, GenrePipeline, PersonPipeline,
    PipelineContext,
};
