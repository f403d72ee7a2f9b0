//! Persistent key-value storage for client state
//!
//! Values are JSON strings. Reads are synchronous so stores can rehydrate
//! in their constructors.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

pub trait KeyValueStore: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// Volatile storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> ClientResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| storage_error(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn storage_error(path: &Path, err: std::io::Error) -> ClientError {
    ClientError::Storage(format!("{}: {err}", path.display()))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(&path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| storage_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| storage_error(&path, e))
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(&path, e)),
        }
    }
}

/// Storage selected by `config.storage_dir`
pub fn open(config: &ClientConfig) -> ClientResult<Arc<dyn KeyValueStore>> {
    Ok(match &config.storage_dir {
        Some(dir) => Arc::new(FileStore::new(dir)?),
        None => Arc::new(MemoryStore::new()),
    })
}

pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> ClientResult<Option<T>> {
    match store.get(key)? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

pub fn save<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> ClientResult<()> {
    store.set(key, &serde_json::to_string(value)?)
}

/// Load a persisted value, logging and discarding anything unreadable
pub(crate) fn rehydrate<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match load(store, key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable persisted state");
            None
        }
    }
}

/// Persist a value, logging failures; in-memory state stays authoritative
pub(crate) fn persist<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    if let Err(e) = save(store, key, value) {
        tracing::warn!(key, error = %e, "Failed to persist state");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state")).unwrap();
        assert_eq!(store.get("cart-storage").unwrap(), None);

        save(&store, "cart-storage", &vec![1, 2, 3]).unwrap();
        let loaded: Option<Vec<i32>> = load(&store, "cart-storage").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));

        store.remove("cart-storage").unwrap();
        store.remove("cart-storage").unwrap();
        assert_eq!(store.get("cart-storage").unwrap(), None);
    }

    #[test]
    fn test_corrupt_value_is_discarded() {
        let store = MemoryStore::new();
        store.set("auth-storage", "{not json").unwrap();
        assert!(load::<Vec<i32>>(&store, "auth-storage").is_err());
        assert_eq!(rehydrate::<Vec<i32>>(&store, "auth-storage"), None);
    }
}
