//! OpenSearch implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! using OpenSearch (or a wire-compatible Elasticsearch) as the backend.

mod bulk;
mod client;

pub use client::OpenSearchClient;
