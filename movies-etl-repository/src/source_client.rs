//! Retrying wrapper around a source reader.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::SourceError;
use crate::interfaces::SourceReader;
use crate::retry::RetryPolicy;
use movies_etl_shared::{
    ChangeAxis, EntityId, FilmworkGenreRow, FilmworkRow, GenreRow, ParticipantRow, PersonRow,
};

/// Source reader that retries connectivity failures of the wrapped reader.
///
/// Every other error is passed through unchanged so the caller can abort.
pub struct SourceClient {
    reader: Arc<dyn SourceReader>,
    retry: RetryPolicy,
}

impl SourceClient {
    pub fn new(reader: Arc<dyn SourceReader>) -> Self {
        Self {
            reader,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(reader: Arc<dyn SourceReader>, retry: RetryPolicy) -> Self {
        Self { reader, retry }
    }
}

#[async_trait]
impl SourceReader for SourceClient {
    async fn read_changed_ids(
        &self,
        axis: ChangeAxis,
        since: Option<DateTime<Utc>>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<EntityId>, SourceError> {
        self.retry
            .run(
                || self.reader.read_changed_ids(axis, since, offset, limit),
                SourceError::is_transient,
            )
            .await
    }

    async fn read_genres(&self, ids: &[EntityId]) -> Result<Vec<GenreRow>, SourceError> {
        self.retry
            .run(|| self.reader.read_genres(ids), SourceError::is_transient)
            .await
    }

    async fn read_persons(&self, ids: &[EntityId]) -> Result<Vec<PersonRow>, SourceError> {
        self.retry
            .run(|| self.reader.read_persons(ids), SourceError::is_transient)
            .await
    }

    async fn read_filmworks(&self, ids: &[EntityId]) -> Result<Vec<FilmworkRow>, SourceError> {
        self.retry
            .run(|| self.reader.read_filmworks(ids), SourceError::is_transient)
            .await
    }

    async fn read_filmwork_participants(
        &self,
        filmwork_ids: &[EntityId],
    ) -> Result<Vec<ParticipantRow>, SourceError> {
        self.retry
            .run(
                || self.reader.read_filmwork_participants(filmwork_ids),
                SourceError::is_transient,
            )
            .await
    }

    async fn read_filmwork_genres(
        &self,
        filmwork_ids: &[EntityId],
    ) -> Result<Vec<FilmworkGenreRow>, SourceError> {
        self.retry
            .run(
                || self.reader.read_filmwork_genres(filmwork_ids),
                SourceError::is_transient,
            )
            .await
    }
}
