//! JSON file state storage.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::errors::StateError;
use crate::interfaces::{StateMap, StateStorage};

/// Stores the state snapshot as a JSON object in a single file.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StateStorage for JsonFileStorage {
    async fn retrieve_state(&self) -> Result<StateMap, StateError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = ?self.path, "No state file, starting with empty state");
                let state = StateMap::new();
                self.save_state(&state).await?;
                return Ok(state);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<StateMap>(&content) {
            Ok(state) => {
                debug!(path = ?self.path, keys = state.len(), "Loaded state");
                Ok(state)
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Unreadable state file, resetting to empty state");
                let state = StateMap::new();
                self.save_state(&state).await?;
                Ok(state)
            }
        }
    }

    async fn save_state(&self, state: &StateMap) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_vec(state)?;

        // The temp file must reach disk before it replaces the snapshot.
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&content).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&temp_path, &self.path).await?;

        debug!(path = ?self.path, keys = state.len(), "Saved state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_yields_empty_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("etl.json");
        let storage = JsonFileStorage::new(&path);

        let state = storage.retrieve_state().await.unwrap();

        assert!(state.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_corrupt_file_yields_empty_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("etl.json");
        std::fs::write(&path, "{\"timestamp\": ").unwrap();
        let storage = JsonFileStorage::new(&path);

        assert!(storage.retrieve_state().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_file_yields_empty_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("etl.json");
        std::fs::write(&path, "").unwrap();
        let storage = JsonFileStorage::new(&path);

        assert!(storage.retrieve_state().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_survives_new_instance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("etl.json");

        let mut state = StateMap::new();
        state.insert("timestamp".to_string(), json!("2024-01-01T00:00:00+00:00"));
        state.insert("other".to_string(), json!(42));
        JsonFileStorage::new(&path).save_state(&state).await.unwrap();

        let reloaded = JsonFileStorage::new(&path).retrieve_state().await.unwrap();

        assert_eq!(reloaded, state);
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_save_replaces_snapshot_and_stale_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("etl.json");
        std::fs::write(&path, "{\"timestamp\":\"old\"}").unwrap();
        std::fs::write(path.with_extension("tmp"), "{\"timest").unwrap();

        let mut state = StateMap::new();
        state.insert("timestamp".to_string(), json!("new"));
        JsonFileStorage::new(&path).save_state(&state).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\"timestamp\":\"new\"}"
        );
        assert!(!path.with_extension("tmp").exists());
    }
}
