//! # Movies ETL Repository
//!
//! This crate provides traits and implementations for the storage the ETL
//! talks to: the relational source it reads changes from, the search index
//! it writes documents to, and the state file holding the watermark. It also
//! provides the retry policy shared by the source and index clients.

pub mod client;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod postgres;
pub mod retry;
pub mod source_client;
pub mod state;
pub mod types;

pub use client::SearchIndexClient;
pub use errors::{SearchIndexError, SourceError, StateError};
pub use interfaces::{IndexWriter, SearchIndexProvider, SourceReader, StateMap, StateStorage};
pub use opensearch::OpenSearchClient;
pub use postgres::PostgresReader;
pub use retry::RetryPolicy;
pub use source_client::SourceClient;
pub use state::{JsonFileStorage, MemoryStorage, State, Watermark};
pub use types::{BatchOperationResult, BatchOperationSummary, BulkItem, DocumentError};
