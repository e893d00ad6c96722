//! State storage trait definition.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::StateError;

/// Snapshot of the whole key/value state.
pub type StateMap = BTreeMap<String, Value>;

/// Durable storage for the ETL state.
///
/// The state is always read and written as a whole snapshot.
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Load the persisted snapshot. Missing or unreadable content yields an empty map.
    async fn retrieve_state(&self) -> Result<StateMap, StateError>;

    /// Replace the persisted snapshot. Returns once the write is durable.
    async fn save_state(&self, state: &StateMap) -> Result<(), StateError>;
}
