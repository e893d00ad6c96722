//! In-memory source and index shared by the pipeline tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use movies_etl_repository::{
    BatchOperationResult, BatchOperationSummary, BulkItem, DocumentError, IndexWriter,
    SearchIndexError, SourceError, SourceReader,
};
use movies_etl_shared::{
    ChangeAxis, EntityId, FilmworkGenreRow, FilmworkRow, GenreRow, ParticipantRow, PersonRow,
};

type ChangeCall = (ChangeAxis, Option<DateTime<Utc>>, usize, usize);

/// Source backed by plain vectors. Change queries ignore `since`.
#[derive(Default)]
pub(crate) struct MockSource {
    pub changes: HashMap<ChangeAxis, Vec<EntityId>>,
    pub genres: Vec<GenreRow>,
    pub persons: Vec<PersonRow>,
    pub filmworks: Vec<FilmworkRow>,
    pub participants: Vec<ParticipantRow>,
    pub filmwork_genres: Vec<FilmworkGenreRow>,
    pub failing_axis: Option<ChangeAxis>,
    pub change_calls: Mutex<Vec<ChangeCall>>,
    pub filmwork_reads: Mutex<Vec<Vec<EntityId>>>,
}

impl MockSource {
    pub fn with_changes(mut self, axis: ChangeAxis, ids: Vec<EntityId>) -> Self {
        self.changes.insert(axis, ids);
        self
    }
}

fn select<R: Clone>(rows: &[R], ids: &[EntityId], key: impl Fn(&R) -> EntityId) -> Vec<R> {
    rows.iter()
        .filter(|row| ids.contains(&key(row)))
        .cloned()
        .collect()
}

#[async_trait]
impl SourceReader for MockSource {
    async fn read_changed_ids(
        &self,
        axis: ChangeAxis,
        since: Option<DateTime<Utc>>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<EntityId>, SourceError> {
        self.change_calls
            .lock()
            .unwrap()
            .push((axis, since, offset, limit));
        if self.failing_axis == Some(axis) {
            return Err(SourceError::query("column \"modified\" does not exist"));
        }
        Ok(self
            .changes
            .get(&axis)
            .map(|ids| ids.iter().skip(offset).take(limit).copied().collect())
            .unwrap_or_default())
    }

    async fn read_genres(&self, ids: &[EntityId]) -> Result<Vec<GenreRow>, SourceError> {
        Ok(select(&self.genres, ids, |r| r.id))
    }

    async fn read_persons(&self, ids: &[EntityId]) -> Result<Vec<PersonRow>, SourceError> {
        Ok(select(&self.persons, ids, |r| r.id))
    }

    async fn read_filmworks(&self, ids: &[EntityId]) -> Result<Vec<FilmworkRow>, SourceError> {
        self.filmwork_reads.lock().unwrap().push(ids.to_vec());
        Ok(select(&self.filmworks, ids, |r| r.id))
    }

    async fn read_filmwork_participants(
        &self,
        filmwork_ids: &[EntityId],
    ) -> Result<Vec<ParticipantRow>, SourceError> {
        Ok(select(&self.participants, filmwork_ids, |r| r.filmwork_id))
    }

    async fn read_filmwork_genres(
        &self,
        filmwork_ids: &[EntityId],
    ) -> Result<Vec<FilmworkGenreRow>, SourceError> {
        Ok(select(&self.filmwork_genres, filmwork_ids, |r| r.filmwork_id))
    }
}

/// Index writer that stores the last document written per index and id.
#[derive(Default)]
pub(crate) struct MockWriter {
    pub documents: Mutex<HashMap<(String, EntityId), Value>>,
    pub calls: Mutex<Vec<(String, Vec<EntityId>)>>,
    pub rejected: HashSet<EntityId>,
    pub failing_index: Option<&'static str>,
}

impl MockWriter {
    pub fn document(&self, index: &str, id: EntityId) -> Option<Value> {
        self.documents
            .lock()
            .unwrap()
            .get(&(index.to_string(), id))
            .cloned()
    }

    pub fn calls_for(&self, index: &str) -> Vec<Vec<EntityId>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(i, _)| i == index)
            .map(|(_, ids)| ids.clone())
            .collect()
    }
}

#[async_trait]
impl IndexWriter for MockWriter {
    async fn bulk_upsert(
        &self,
        index: &str,
        items: Vec<BulkItem>,
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        if self.failing_index == Some(index) {
            return Err(SearchIndexError::bulk_operation(
                "Bulk request failed with status 400 Bad Request",
            ));
        }
        self.calls.lock().unwrap().push((
            index.to_string(),
            items.iter().map(|i| i.entity_id).collect(),
        ));

        let mut documents = self.documents.lock().unwrap();
        let results = items
            .into_iter()
            .map(|item| {
                if self.rejected.contains(&item.entity_id) {
                    BatchOperationResult::failure(
                        item.entity_id,
                        DocumentError::new("mapper_parsing_exception", "failed to parse field"),
                    )
                } else {
                    documents.insert((index.to_string(), item.entity_id), item.document);
                    BatchOperationResult::success(item.entity_id)
                }
            })
            .collect();

        Ok(BatchOperationSummary::from_results(results))
    }
}

pub(crate) fn genre_row(name: &str) -> GenreRow {
    GenreRow {
        id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

pub(crate) fn person_row(first_name: &str, last_name: &str) -> PersonRow {
    PersonRow {
        id: Uuid::new_v4(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

pub(crate) fn filmwork_row(title: &str) -> FilmworkRow {
    FilmworkRow {
        id: Uuid::new_v4(),
        filmwork_type: "movie".to_string(),
        title: title.to_string(),
        description: None,
        rating: Some(7.5),
    }
}

pub(crate) fn participant(filmwork: &FilmworkRow, person: &PersonRow, role: &str) -> ParticipantRow {
    ParticipantRow {
        filmwork_id: filmwork.id,
        person_id: person.id,
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        role: role.to_string(),
    }
}

pub(crate) fn filmwork_genre(filmwork: &FilmworkRow, genre: &GenreRow) -> FilmworkGenreRow {
    FilmworkGenreRow {
        filmwork_id: filmwork.id,
        genre_id: genre.id,
        name: genre.name.clone(),
    }
}
