//! JSON file-backed key-value store.
//!
//! The whole file is loaded on creation and rewritten on every change using a
//! write-to-temp + rename sequence, so a crash never leaves a truncated file.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "values": {
//!     "instructionsShown": "true"
//!   }
//! }
//! ```

use crate::domain::error::{ActionboardError, Result};
use crate::storage::backend::KvStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateFile {
    version: u32,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            version: 1,
            values: BTreeMap::new(),
        }
    }
}

/// Key-value store persisted as a single JSON document.
///
/// `Send` but not `Sync`; owned by the worker thread.
pub struct JsonKvStore {
    file_path: PathBuf,
    data: StateFile,
}

impl JsonKvStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file yields an empty store; the file itself is only written on
    /// the first [`KvStore::set`].
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or the file
    /// exists but is unreadable or not valid JSON.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use actionboard::storage::JsonKvStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonKvStore::new(PathBuf::from("/tmp/actionboard/state.json"))?;
    /// # Ok::<(), actionboard::ActionboardError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening key-value store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("state file absent, starting empty");
            StateFile::default()
        };

        tracing::debug!(key_count = data.values.len(), "key-value store ready");

        Ok(Self { file_path, data })
    }

    fn load_from_file(path: &Path) -> Result<StateFile> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| ActionboardError::Storage(format!("failed to parse state file: {e}")))
    }

    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| ActionboardError::Storage(format!("failed to serialize state: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing state to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "state saved");
        Ok(())
    }
}

impl KvStore for JsonKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_kv_set", key = %key).entered();

        if self.data.values.get(key).map(String::as_str) == Some(value) {
            tracing::trace!("value unchanged, skipping write");
            return Ok(());
        }

        self.data.values.insert(key.to_string(), value.to_string());
        self.save_to_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::INSTRUCTIONS_SHOWN_KEY;

    #[test]
    fn missing_file_reads_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonKvStore::new(dir.path().join("state.json")).unwrap();

        assert!(!store.get_flag(INSTRUCTIONS_SHOWN_KEY).unwrap());
        assert!(!dir.path().join("state.json").exists());
    }

    #[test]
    fn flag_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut store = JsonKvStore::new(path.clone()).unwrap();
        store.set(INSTRUCTIONS_SHOWN_KEY, "true").unwrap();
        drop(store);

        let reopened = JsonKvStore::new(path.clone()).unwrap();
        assert!(reopened.get_flag(INSTRUCTIONS_SHOWN_KEY).unwrap());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonKvStore::new(path).err().unwrap();
        assert!(matches!(err, ActionboardError::Storage(_)));
    }
}
