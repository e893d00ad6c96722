//! Source reader trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::SourceError;
use movies_etl_shared::{
    ChangeAxis, EntityId, FilmworkGenreRow, FilmworkRow, GenreRow, ParticipantRow, PersonRow,
};

/// Read access to the relational system-of-record.
///
/// `since` is the exclusive lower bound on modification time; `None` selects
/// every row.
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Ids of entities changed after `since` on one change axis.
    ///
    /// Pages are ordered by modification time ascending. An empty page means
    /// the axis is exhausted for this `since`.
    async fn read_changed_ids(
        &self,
        axis: ChangeAxis,
        since: Option<DateTime<Utc>>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<EntityId>, SourceError>;

    /// Genre rows for the given ids.
    async fn read_genres(&self, ids: &[EntityId]) -> Result<Vec<GenreRow>, SourceError>;

    /// Person rows for the given ids.
    async fn read_persons(&self, ids: &[EntityId]) -> Result<Vec<PersonRow>, SourceError>;

    /// Filmwork rows for the given ids, without related records.
    async fn read_filmworks(&self, ids: &[EntityId]) -> Result<Vec<FilmworkRow>, SourceError>;

    /// Persons participating in the given filmworks, with their roles.
    async fn read_filmwork_participants(
        &self,
        filmwork_ids: &[EntityId],
    ) -> Result<Vec<ParticipantRow>, SourceError>;

    /// Genres linked to the given filmworks.
    async fn read_filmwork_genres(
        &self,
        filmwork_ids: &[EntityId],
    ) -> Result<Vec<FilmworkGenreRow>, SourceError>;
}
