//! Cached key/value view over a state storage.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::StateError;
use crate::interfaces::{StateMap, StateStorage};

/// Key/value state backed by a `StateStorage`.
///
/// The snapshot is loaded once; every `set` persists the entire snapshot
/// before returning.
pub struct State {
    storage: Arc<dyn StateStorage>,
    state: StateMap,
}

impl State {
    /// Load the current snapshot from `storage`.
    pub async fn load(storage: Arc<dyn StateStorage>) -> Result<Self, StateError> {
        let state = storage.retrieve_state().await?;
        Ok(Self { storage, state })
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    /// Store `value` under `key` and persist the whole snapshot.
    ///
    /// The in-memory view only changes once the snapshot is persisted.
    pub async fn set(&mut self, key: &str, value: Value) -> Result<(), StateError> {
        let mut next = self.state.clone();
        next.insert(key.to_string(), value);
        self.storage.save_state(&next).await?;
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStorage;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_rewrites_all_keys() {
        let mut initial = StateMap::new();
        initial.insert("kept".to_string(), json!("value"));
        let storage = Arc::new(MemoryStorage::with_state(initial));

        let mut state = State::load(storage.clone()).await.unwrap();
        state.set("timestamp", json!("2024-05-01T10:00:00+00:00")).await.unwrap();

        let persisted = storage.snapshot().await;
        assert_eq!(persisted.get("kept"), Some(&json!("value")));
        assert_eq!(
            persisted.get("timestamp"),
            Some(&json!("2024-05-01T10:00:00+00:00"))
        );
        assert_eq!(state.get("timestamp"), persisted.get("timestamp"));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let state = State::load(Arc::new(MemoryStorage::new())).await.unwrap();
        assert!(state.get("timestamp").is_none());
    }
}
