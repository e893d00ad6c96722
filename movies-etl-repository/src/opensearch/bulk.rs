//! Bulk request bodies and typed bulk responses.
//!
//! The bulk API answers with one entry per submitted action, keyed by the
//! action name. Responses are decoded into structs and matched back to the
//! submitted items by document id.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::SearchIndexError;
use crate::types::{BatchOperationResult, BulkItem, DocumentError};
use movies_etl_shared::EntityId;

/// Bulk action applied to every item of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BulkAction {
    /// Fails per document if the id already exists.
    Create,
    /// Replaces the stored document with the full body (`index` action).
    Replace,
}

/// Build the NDJSON lines of a bulk request, action line then document.
pub(crate) fn bulk_lines(action: BulkAction, items: &[BulkItem]) -> Vec<Value> {
    let mut lines = Vec::with_capacity(items.len() * 2);

    for item in items {
        let id = item.entity_id.to_string();
        let header = match action {
            BulkAction::Create => json!({"create": {"_id": id}}),
            BulkAction::Replace => json!({"index": {"_id": id}}),
        };
        lines.push(header);
        lines.push(item.document.clone());
    }

    lines
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkResponse {
    #[serde(default)]
    pub errors: bool,
    pub items: Vec<BulkResponseItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BulkResponseItem {
    Create(BulkItemResponse),
    Update(BulkItemResponse),
    Index(BulkItemResponse),
    Delete(BulkItemResponse),
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkItemResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: u16,
    pub error: Option<BulkItemError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkItemError {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reason: String,
}

impl BulkResponseItem {
    fn for_action(self, action: BulkAction) -> Option<BulkItemResponse> {
        match (self, action) {
            (Self::Create(item), BulkAction::Create) => Some(item),
            (Self::Index(item), BulkAction::Replace) => Some(item),
            _ => None,
        }
    }
}

/// Match a bulk response to the submitted items, in submission order.
pub(crate) fn into_results(
    response: BulkResponse,
    action: BulkAction,
    items: &[BulkItem],
) -> Result<Vec<BatchOperationResult>, SearchIndexError> {
    let mut outcomes: HashMap<EntityId, Option<DocumentError>> =
        HashMap::with_capacity(response.items.len());

    for entry in response.items {
        let item = entry.for_action(action).ok_or_else(|| {
            SearchIndexError::parse(format!("Unexpected action in {:?} bulk response", action))
        })?;
        let entity_id = Uuid::parse_str(&item.id).map_err(|e| {
            SearchIndexError::parse(format!("Invalid document id {:?} in bulk response: {}", item.id, e))
        })?;
        let error = item
            .error
            .map(|e| DocumentError::new(e.kind, e.reason));
        outcomes.insert(entity_id, error);
    }

    items
        .iter()
        .map(|item| match outcomes.remove(&item.entity_id) {
            Some(None) => Ok(BatchOperationResult::success(item.entity_id)),
            Some(Some(error)) => Ok(BatchOperationResult::failure(item.entity_id, error)),
            None => Err(SearchIndexError::parse(format!(
                "Document {} missing from bulk response",
                item.entity_id
            ))),
        })
        .collect()
}
