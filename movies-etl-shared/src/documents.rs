//! Documents stored in the search index.
//!
//! Every document is self-contained: the read side performs no joins, so a
//! filmwork carries its genres and participants inline. A write always
//! replaces the whole document.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::EntityKind;
use crate::rows::{FilmworkRow, GenreRow, PersonRow};
use crate::EntityId;

/// A document that can be written to the search index.
pub trait IndexDocument: Serialize + Send + Sync {
    /// The kind of entity, which also selects the target index.
    const KIND: EntityKind;

    /// The document identity in the index.
    fn document_id(&self) -> EntityId;
}

/// Genre document, also used as the genre summary nested in filmworks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreDocument {
    pub id: EntityId,
    pub name: String,
}

impl From<GenreRow> for GenreDocument {
    fn from(row: GenreRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

impl IndexDocument for GenreDocument {
    const KIND: EntityKind = EntityKind::Genre;

    fn document_id(&self) -> EntityId {
        self.id
    }
}

/// Person document, also used as the participant summary nested in filmworks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDocument {
    pub id: EntityId,
    pub full_name: String,
}

impl From<PersonRow> for PersonDocument {
    fn from(row: PersonRow) -> Self {
        Self {
            full_name: row.full_name(),
            id: row.id,
        }
    }
}

impl IndexDocument for PersonDocument {
    const KIND: EntityKind = EntityKind::Person;

    fn document_id(&self) -> EntityId {
        self.id
    }
}

/// Role a person played in a filmwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Actor,
    Writer,
    Director,
}

/// A role string in the source that is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown participant role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for ParticipantRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actor" => Ok(Self::Actor),
            "writer" => Ok(Self::Writer),
            "director" => Ok(Self::Director),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Filmwork document with its genres and participants inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmworkDocument {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub filmwork_type: String,
    pub title: String,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub genres: Vec<GenreDocument>,
    pub directors: Vec<PersonDocument>,
    pub writers: Vec<PersonDocument>,
    pub actors: Vec<PersonDocument>,
}

impl FilmworkDocument {
    /// Participants of the given role.
    pub fn participants_mut(&mut self, role: ParticipantRole) -> &mut Vec<PersonDocument> {
        match role {
            ParticipantRole::Actor => &mut self.actors,
            ParticipantRole::Writer => &mut self.writers,
            ParticipantRole::Director => &mut self.directors,
        }
    }
}

impl From<FilmworkRow> for FilmworkDocument {
    /// A bare document with empty genre and participant lists, ready for enrichment.
    fn from(row: FilmworkRow) -> Self {
        Self {
            id: row.id,
            filmwork_type: row.filmwork_type,
            title: row.title,
            description: row.description,
            rating: row.rating,
            genres: Vec::new(),
            directors: Vec::new(),
            writers: Vec::new(),
            actors: Vec::new(),
        }
    }
}

impl IndexDocument for FilmworkDocument {
    const KIND: EntityKind = EntityKind::Filmwork;

    fn document_id(&self) -> EntityId {
        self.id
    }
}
