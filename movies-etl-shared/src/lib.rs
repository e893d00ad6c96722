//! # Movies ETL Shared
//!
//! Shared types for the movies ETL: entity kinds and change axes, the rows
//! read from the relational source and the documents written to the search
//! index.

pub mod documents;
pub mod entity;
pub mod rows;

pub use documents::{
    FilmworkDocument, GenreDocument, IndexDocument, ParticipantRole, PersonDocument, UnknownRole,
};
pub use entity::{ChangeAxis, ChangeId, EntityKind};
pub use rows::{FilmworkGenreRow, FilmworkRow, GenreRow, ParticipantRow, PersonRow};

/// Identifier type shared by every entity in the source schema.
pub type EntityId = uuid::Uuid;
