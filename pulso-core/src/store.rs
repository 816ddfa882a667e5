//! Durable storage for the latest persisted monitor state.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::RwLock;
use tracing::warn;

use crate::error::StoreError;
use crate::snapshot::PersistedState;

/// State file name inside the data directory.
const STATE_FILE: &str = "last_state.json";

/// File-backed holder of the single persisted record.
///
/// No history is retained: every save overwrites the record wholesale, and
/// a reader always sees either the previous record or the new one.
pub struct StateStore {
    state: RwLock<Option<PersistedState>>,
    file_path: PathBuf,
}

impl StateStore {
    /// Open the store under `data_dir`. A missing file is an empty store; a
    /// corrupt file is logged and treated as absent.
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let file_path = data_dir.join(STATE_FILE);

        let state = if file_path.exists() {
            let content = fs::read_to_string(&file_path).await?;
            match serde_json::from_str(&content) {
                Ok(state) => Some(state),
                Err(e) => {
                    warn!("discarding corrupt state file: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            state: RwLock::new(state),
            file_path,
        })
    }

    /// Latest persisted record, if any poll has completed.
    pub async fn load(&self) -> Option<PersistedState> {
        self.state.read().await.clone()
    }

    /// Replace the persisted record.
    ///
    /// The file is written to a temporary path and renamed into place, so a
    /// crash mid-write cannot leave a torn record behind.
    pub async fn save(&self, state: PersistedState) -> Result<(), StoreError> {
        let mut guard = self.state.write().await;

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(&state)?;
        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &self.file_path).await?;

        *guard = Some(state);
        Ok(())
    }

    /// Path of the backing file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}
