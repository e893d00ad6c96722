//! Error types for the movies ETL repository.

mod search_index_error;
mod source_error;
mod state_error;

pub use search_index_error::SearchIndexError;
pub use source_error::SourceError;
pub use state_error::StateError;
