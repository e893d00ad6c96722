//! Rows read from the relational source.

use crate::EntityId;

/// A row of `movies_genre`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreRow {
    pub id: EntityId,
    pub name: String,
}

/// A row of `movies_person`.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRow {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
}

impl PersonRow {
    /// The display name stored in the index.
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// A row of `movies_filmwork`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmworkRow {
    pub id: EntityId,
    pub filmwork_type: String,
    pub title: String,
    pub description: Option<String>,
    pub rating: Option<f64>,
}

/// A person linked to a filmwork together with the role they played.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRow {
    pub filmwork_id: EntityId,
    pub person_id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl ParticipantRow {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// A genre linked to a filmwork.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmworkGenreRow {
    pub filmwork_id: EntityId,
    pub genre_id: EntityId,
    pub name: String,
}

fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}
