//! Key-value storage backends
//!
//! The roster and the settings each live under one string key, mirroring the
//! browser's `localStorage` API.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StorageError;

/// String-keyed, string-valued store
pub trait KeyValueStorage {
    /// Returns `Ok(None)` when the key has never been written
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key, e.g. with a previously stored roster
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Direct read for inspection (bypasses the `Result`)
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.peek(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// File-backed storage for native builds
///
/// The whole file is a JSON object mapping keys to string values. Writes go to
/// a sibling temp file which is then renamed over the original.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_map(&self) -> Result<std::collections::BTreeMap<String, String>, StorageError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Default::default()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Default::default());
        }
        serde_json::from_str(&text).map_err(|e| StorageError::Read(e.to_string()))
    }

    fn write_map(
        &self,
        map: &std::collections::BTreeMap<String, String>,
    ) -> Result<(), StorageError> {
        let json =
            serde_json::to_string_pretty(map).map_err(|e| StorageError::Write(e.to_string()))?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// Browser `window.localStorage`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// Fails with `Unavailable` when there is no window or storage is disabled
    pub fn open() -> Result<Self, StorageError> {
        let inner = web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { inner })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{:?}", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_clones_share_items() {
        let mut storage = MemoryStorage::new();
        let view = storage.clone();
        storage.set_item("employees", "[]").unwrap();
        assert_eq!(view.get_item("employees").unwrap().as_deref(), Some("[]"));
        storage.remove_item("employees").unwrap();
        assert_eq!(view.peek("employees"), None);
    }

    #[test]
    fn test_file_storage_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("roster.json"));
        assert_eq!(storage.get_item("employees").unwrap(), None);
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");

        let mut storage = FileStorage::new(&path);
        storage.set_item("employees", "[1]").unwrap();
        storage.set_item("roster_settings", "{}").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("employees").unwrap().as_deref(), Some("[1]"));
        assert_eq!(reopened.get_item("roster_settings").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_storage_remove_item() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("roster.json"));
        storage.set_item("employees", "[]").unwrap();
        storage.remove_item("employees").unwrap();
        assert_eq!(storage.get_item("employees").unwrap(), None);
        // Removing a missing key is fine
        storage.remove_item("employees").unwrap();
    }

    #[test]
    fn test_file_storage_corrupt_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        std::fs::write(&path, "not json").unwrap();
        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get_item("employees"),
            Err(StorageError::Read(_))
        ));
    }
}
