//! Key-value persistence for application records
//!
//! Two logical records back the whole app: the user profile and the
//! collection list. Each key is stored as a JSON document in its own
//! file under the data directory; absence of a key means
//! uninitialized, not an error.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Durable string-keyed record store
pub trait KeyValueStore: Send {
    /// Read a record; absence of the key is not an error
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// File-backed store: one JSON file per key under the data directory
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("flashgenius"))
            .ok_or(StoreError::DataDirNotFound)
    }

    /// Create the data directory if missing
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.init()?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_set_remove_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileKeyValueStore::new(temp_dir.path().to_path_buf());

        assert_eq!(store.get("missing").unwrap(), None);

        store.set("record", "{\"a\":1}").unwrap();
        assert_eq!(store.get("record").unwrap().as_deref(), Some("{\"a\":1}"));

        store.set("record", "{\"a\":2}").unwrap();
        assert_eq!(store.get("record").unwrap().as_deref(), Some("{\"a\":2}"));

        store.remove("record").unwrap();
        assert_eq!(store.get("record").unwrap(), None);

        // Removing an absent key is not an error
        store.remove("record").unwrap();
    }

    #[test]
    fn test_set_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("dir");
        let mut store = FileKeyValueStore::new(nested.clone());

        store.set("record", "x").unwrap();
        assert!(nested.join("record.json").exists());
    }
}
