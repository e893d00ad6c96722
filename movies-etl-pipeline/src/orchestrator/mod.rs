//! Orchestrator module for the movies ETL pipeline.
//!
//! Drives beats: each beat runs every entity pipeline to exhaustion and then
//! advances the watermark.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument};

use crate::aggregator::{Batch, BatchSink};
use crate::errors::PipelineError;
use crate::pipelines::EntityPipeline;
use movies_etl_repository::Watermark;
use movies_etl_shared::EntityKind;

/// Default pause between two beats.
pub const DEFAULT_BEAT_INTERVAL: Duration = Duration::from_secs(10);

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Time to sleep after a beat before starting the next one.
    pub beat_interval: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            beat_interval: DEFAULT_BEAT_INTERVAL,
        }
    }
}

/// Where the orchestrator is within a beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeatState {
    Idle,
    ReadingChanges,
    Aggregating,
    Writing,
    Advancing,
}

impl fmt::Display for BeatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BeatState::Idle => "idle",
            BeatState::ReadingChanges => "reading_changes",
            BeatState::Aggregating => "aggregating",
            BeatState::Writing => "writing",
            BeatState::Advancing => "advancing",
        };
        f.write_str(name)
    }
}

fn transition(state: &mut BeatState, next: BeatState) {
    debug!(from = %state, to = %next, "Beat state changed");
    *state = next;
}

/// Outcome of one pipeline within a beat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub kind: EntityKind,
    /// Distinct entities found changed.
    pub changed: usize,
    pub batches: usize,
    pub written: usize,
    pub failed: usize,
}

impl PipelineReport {
    fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            changed: 0,
            batches: 0,
            written: 0,
            failed: 0,
        }
    }
}

/// Outcome of a completed beat.
#[derive(Debug, Clone, PartialEq)]
pub struct BeatReport {
    /// Watermark the beat read changes after.
    pub since: Option<DateTime<Utc>>,
    /// Watermark persisted at the end of the beat.
    pub advanced_to: DateTime<Utc>,
    pub pipelines: Vec<PipelineReport>,
}

/// Sink handing every batch of a pipeline back to the same pipeline for indexing.
struct IndexingStage<'a> {
    pipeline: &'a dyn EntityPipeline,
    state: &'a mut BeatState,
    report: PipelineReport,
}

#[async_trait]
impl<'a> BatchSink for IndexingStage<'a> {
    async fn accept(&mut self, batch: Batch) -> Result<(), PipelineError> {
        transition(self.state, BeatState::Writing);
        let summary = self.pipeline.update_index(&batch).await?;
        transition(self.state, BeatState::Aggregating);

        self.report.batches += 1;
        self.report.written += summary.succeeded;
        self.report.failed += summary.failed;
        Ok(())
    }
}

/// Orchestrator that runs the entity pipelines on a fixed interval.
///
/// The orchestrator:
/// - Reads the watermark once at the start of each beat
/// - Runs the genre, person and filmwork pipelines one after another
/// - Advances the watermark only when every pipeline completed
/// - Stops between beats on ctrl-c
pub struct Orchestrator {
    pipelines: Vec<Box<dyn EntityPipeline>>,
    watermark: Watermark,
    config: OrchestratorConfig,
    state: BeatState,
}

impl Orchestrator {
    /// Create a new orchestrator with the given pipelines, run in order.
    pub fn new(pipelines: Vec<Box<dyn EntityPipeline>>, watermark: Watermark) -> Self {
        Self::with_config(pipelines, watermark, OrchestratorConfig::default())
    }

    /// Create a new orchestrator with custom configuration.
    pub fn with_config(
        pipelines: Vec<Box<dyn EntityPipeline>>,
        watermark: Watermark,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            pipelines,
            watermark,
            config,
            state: BeatState::Idle,
        }
    }

    pub fn state(&self) -> BeatState {
        self.state
    }

    pub fn watermark(&self) -> &Watermark {
        &self.watermark
    }

    /// Run beats until ctrl-c is received between two beats.
    ///
    /// A fatal error aborts the current beat and is returned without the
    /// watermark having moved.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<(), PipelineError> {
        info!(
            beat_interval_secs = self.config.beat_interval.as_secs(),
            "Starting movies ETL orchestrator"
        );

        loop {
            if let Err(e) = self.run_beat().await {
                error!(error = %e, "Beat failed, watermark not advanced");
                return Err(e);
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.beat_interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        info!("Orchestrator shutdown complete");
        Ok(())
    }

    /// Run every pipeline once and advance the watermark.
    ///
    /// The new watermark is the time the beat started, so rows modified while
    /// the beat runs are read again by the next one.
    pub async fn run_beat(&mut self) -> Result<BeatReport, PipelineError> {
        let result = self.beat().await;
        transition(&mut self.state, BeatState::Idle);
        result
    }

    async fn beat(&mut self) -> Result<BeatReport, PipelineError> {
        let started_at = Utc::now();
        transition(&mut self.state, BeatState::ReadingChanges);

        let since = self.watermark.get();
        let since_label = since
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "beginning".to_string());
        info!(since = %since_label, "Starting beat");

        let mut reports = Vec::with_capacity(self.pipelines.len());
        for pipeline in &self.pipelines {
            transition(&mut self.state, BeatState::Aggregating);
            let mut stage = IndexingStage {
                pipeline: pipeline.as_ref(),
                state: &mut self.state,
                report: PipelineReport::new(pipeline.kind()),
            };

            let stats = pipeline.get_changed_ids(since, &mut stage).await?;

            let mut report = stage.report;
            report.changed = stats.distinct;
            info!(
                kind = %report.kind,
                changed = report.changed,
                batches = report.batches,
                written = report.written,
                failed = report.failed,
                "Pipeline finished"
            );
            reports.push(report);
        }

        transition(&mut self.state, BeatState::Advancing);
        self.watermark.set(started_at).await?;

        Ok(BeatReport {
            since,
            advanced_to: started_at,
            pipelines: reports,
        })
    }
}
