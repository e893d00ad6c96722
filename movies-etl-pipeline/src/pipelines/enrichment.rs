//! Assembly of filmwork documents from their rows and related records.

use std::collections::HashMap;

use crate::errors::PipelineError;
use movies_etl_shared::{
    EntityId, FilmworkDocument, FilmworkGenreRow, FilmworkRow, GenreDocument, ParticipantRole,
    ParticipantRow, PersonDocument,
};

/// Build filmwork documents, attaching participants by role and genres.
///
/// Documents keep the order of `filmworks`. Related rows of filmworks that are
/// not in `filmworks` are ignored. A participant with an unknown role fails
/// the whole batch.
pub fn enrich_filmworks(
    filmworks: Vec<FilmworkRow>,
    participants: Vec<ParticipantRow>,
    genres: Vec<FilmworkGenreRow>,
) -> Result<Vec<FilmworkDocument>, PipelineError> {
    let mut documents: Vec<FilmworkDocument> =
        filmworks.into_iter().map(FilmworkDocument::from).collect();
    let positions: HashMap<EntityId, usize> = documents
        .iter()
        .enumerate()
        .map(|(position, document)| (document.id, position))
        .collect();

    for participant in participants {
        let role: ParticipantRole = participant.role.parse().map_err(|e| {
            PipelineError::enrichment(format!("filmwork {}: {}", participant.filmwork_id, e))
        })?;

        if let Some(&position) = positions.get(&participant.filmwork_id) {
            let person = PersonDocument {
                id: participant.person_id,
                full_name: participant.full_name(),
            };
            documents[position].participants_mut(role).push(person);
        }
    }

    for genre in genres {
        if let Some(&position) = positions.get(&genre.filmwork_id) {
            documents[position].genres.push(GenreDocument {
                id: genre.genre_id,
                name: genre.name,
            });
        }
    }

    Ok(documents)
}
