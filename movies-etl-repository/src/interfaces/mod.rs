//! Interface definitions for the source, the search index and the state storage.
//!
//! These traits allow for dependency injection and swappable backend
//! implementations, so the pipeline can be exercised against in-memory mocks.

mod index_writer;
mod search_index_provider;
mod source_reader;
mod state_storage;

pub use index_writer::IndexWriter;
pub use search_index_provider::SearchIndexProvider;
pub use source_reader::SourceReader;
pub use state_storage::{StateMap, StateStorage};
