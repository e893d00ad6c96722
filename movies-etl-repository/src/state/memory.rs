//! In-memory state storage.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::StateError;
use crate::interfaces::{StateMap, StateStorage};

/// Keeps the snapshot in memory. Used for tests and dry runs.
#[derive(Default)]
pub struct MemoryStorage {
    state: RwLock<StateMap>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an initial snapshot.
    pub fn with_state(state: StateMap) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Copy of the current snapshot.
    pub async fn snapshot(&self) -> StateMap {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl StateStorage for MemoryStorage {
    async fn retrieve_state(&self) -> Result<StateMap, StateError> {
        Ok(self.state.read().await.clone())
    }

    async fn save_state(&self, state: &StateMap) -> Result<(), StateError> {
        *self.state.write().await = state.clone();
        Ok(())
    }
}
