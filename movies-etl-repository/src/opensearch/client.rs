//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    BulkParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use super::bulk::{bulk_lines, into_results, BulkAction, BulkResponse};
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{BatchOperationResult, BulkItem};

/// Status codes for which the whole bulk call is retried.
const RETRYABLE_STATUS_CODES: [u16; 2] = [429, 503];

/// OpenSearch client implementation.
///
/// # Example
///
/// ```ignore
/// let provider = OpenSearchClient::new("http://localhost:9200")?;
/// let client = SearchIndexClient::new(Box::new(provider));
/// let summary = client.bulk_upsert("genres", items).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If the URL or transport setup is invalid
    pub fn new(url: &str) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::validation(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::validation(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch client");

        Ok(Self { client })
    }

    /// Send one bulk request and decode the per-document outcome.
    #[instrument(skip(self, items), fields(count = items.len()))]
    async fn send_bulk(
        &self,
        index: &str,
        action: BulkAction,
        items: &[BulkItem],
    ) -> Result<Vec<BatchOperationResult>, SearchIndexError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let body: Vec<JsonBody<Value>> = bulk_lines(action, items)
            .into_iter()
            .map(JsonBody::from)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if RETRYABLE_STATUS_CODES.contains(&status.as_u16()) {
            return Err(SearchIndexError::connection(format!(
                "Bulk request rejected with status {}",
                status
            )));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk_operation(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        // A body cut off mid-read is a transport failure; only a complete body
        // of the wrong shape is a parse error.
        let raw = response.text().await.map_err(|e| {
            SearchIndexError::connection(format!("Failed to read bulk response: {}", e))
        })?;
        let parsed: BulkResponse = serde_json::from_str(&raw)
            .map_err(|e| SearchIndexError::parse(format!("Unexpected bulk response: {}", e)))?;

        debug!(has_errors = parsed.errors, "Bulk request completed");

        into_results(parsed, action, items)
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchClient {
    async fn bulk_create(
        &self,
        index: &str,
        items: &[BulkItem],
    ) -> Result<Vec<BatchOperationResult>, SearchIndexError> {
        self.send_bulk(index, BulkAction::Create, items).await
    }

    async fn bulk_update(
        &self,
        index: &str,
        items: &[BulkItem],
    ) -> Result<Vec<BatchOperationResult>, SearchIndexError> {
        self.send_bulk(index, BulkAction::Replace, items).await
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }
}
