//! Entity kinds and the change axes used to detect modified entities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EntityId;

/// The kinds of entity synchronized into the search index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Genre,
    Person,
    Filmwork,
}

impl EntityKind {
    /// All kinds, in the order a beat processes them.
    pub const ALL: [EntityKind; 3] = [EntityKind::Genre, EntityKind::Person, EntityKind::Filmwork];

    /// Name of the search index holding documents of this kind.
    pub fn index_name(&self) -> &'static str {
        match self {
            EntityKind::Genre => "genres",
            EntityKind::Person => "persons",
            EntityKind::Filmwork => "movies",
        }
    }

    /// The change axes that report modifications for this kind, in priority order.
    pub fn axes(&self) -> &'static [ChangeAxis] {
        match self {
            EntityKind::Genre => &[ChangeAxis::Genre],
            EntityKind::Person => &[ChangeAxis::Person],
            EntityKind::Filmwork => &[
                ChangeAxis::Filmwork,
                ChangeAxis::FilmworkViaGenre,
                ChangeAxis::FilmworkViaPerson,
            ],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Genre => "genre",
            EntityKind::Person => "person",
            EntityKind::Filmwork => "filmwork",
        };
        f.write_str(name)
    }
}

/// One source of "this entity changed" signal.
///
/// Standalone genres and persons have a single axis each. A filmwork changes
/// when its own row is edited, or when a genre or person linked to it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeAxis {
    /// A genre row was modified.
    Genre,
    /// A person row was modified.
    Person,
    /// A filmwork row was modified.
    Filmwork,
    /// A genre linked to the filmwork was modified.
    FilmworkViaGenre,
    /// A person participating in the filmwork was modified.
    FilmworkViaPerson,
}

impl ChangeAxis {
    /// The entity kind whose ids this axis yields.
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            ChangeAxis::Genre => EntityKind::Genre,
            ChangeAxis::Person => EntityKind::Person,
            ChangeAxis::Filmwork | ChangeAxis::FilmworkViaGenre | ChangeAxis::FilmworkViaPerson => {
                EntityKind::Filmwork
            }
        }
    }
}

impl fmt::Display for ChangeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeAxis::Genre => "genre",
            ChangeAxis::Person => "person",
            ChangeAxis::Filmwork => "filmwork",
            ChangeAxis::FilmworkViaGenre => "filmwork_via_genre",
            ChangeAxis::FilmworkViaPerson => "filmwork_via_person",
        };
        f.write_str(name)
    }
}

/// An entity identifier tagged with the kind it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeId {
    pub id: EntityId,
    pub kind: EntityKind,
}

impl ChangeId {
    pub fn new(id: EntityId, kind: EntityKind) -> Self {
        Self { id, kind }
    }
}
