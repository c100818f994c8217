//! JSON-file-backed storage.
//!
//! The entire store is one JSON object mapping keys to string values,
//! read fully at open and rewritten in full on every set. A file that
//! fails to parse is logged and treated as empty rather than blocking
//! startup; the corrupt content is overwritten on the next write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{KeyValueStorage, StorageError};

/// Key-value storage persisted as a single JSON object file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the store at `path`, creating parent directories as
    /// needed. A missing file starts empty; an unparseable file is
    /// discarded with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file exists but cannot be read,
    /// or the parent directory cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    log::warn!(
                        "store file {} is corrupt ({e}); starting from empty state",
                        path.display()
                    );
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    /// Opens the store at the canonical path (see [`crate::paths`]).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be opened.
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(crate::paths::store_path())
    }

    /// Returns the path this store writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir().join(format!("parkwatch-test-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn missing_file_starts_empty() {
        let path = temp_store_path();
        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("parking-reports").unwrap(), None);
    }

    #[test]
    fn set_then_reopen_round_trips() {
        let path = temp_store_path();
        {
            let mut storage = FileStorage::open(&path).unwrap();
            storage.set("parking-reports", "[]").unwrap();
        }
        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(
            storage.get("parking-reports").unwrap(),
            Some("[]".to_string())
        );
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn corrupt_file_is_treated_as_empty() {
        let path = temp_store_path();
        std::fs::write(&path, "{not json at all").unwrap();
        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("anything").unwrap(), None);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn set_replaces_previous_value() {
        let path = temp_store_path();
        let mut storage = FileStorage::open(&path).unwrap();
        storage.set("k", "one").unwrap();
        storage.set("k", "two").unwrap();
        assert_eq!(storage.get("k").unwrap(), Some("two".to_string()));
        std::fs::remove_file(&path).ok();
    }
}
