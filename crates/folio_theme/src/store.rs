//! Accent persistence
//!
//! A durable string key-value store scoped to one site, mirroring browser
//! local storage. The controller makes exactly one attempt per read or
//! write; callers treat every error as "use the in-memory value".

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage is disabled or missing entirely
    #[error("storage unavailable")]
    Unavailable,

    /// Backing file could not be read or written
    #[error("storage I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Backing file exists but is not a string map
    #[error("storage file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// A string key-value store
pub trait AccentStore {
    /// Read a key; `Ok(None)` when absent
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Write a key, replacing any previous value
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store
#[derive(Debug)]
pub struct MemoryStore {
    entries: RefCell<FxHashMap<String, String>>,
    available: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RefCell::default(),
            available: true,
        }
    }

    /// A store that fails every call, like disabled browser storage
    pub fn unavailable() -> Self {
        Self {
            entries: RefCell::default(),
            available: false,
        }
    }

    /// Pre-populate a key
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Read a key directly, bypassing availability
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccentStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        if !self.available {
            return Err(StoreError::Unavailable);
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        if !self.available {
            return Err(StoreError::Unavailable);
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store with no backing at all
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl AccentStore for NullStore {
    fn load(&self, _key: &str) -> Result<Option<String>> {
        Err(StoreError::Unavailable)
    }

    fn save(&self, _key: &str, _value: &str) -> Result<()> {
        Err(StoreError::Unavailable)
    }
}

/// JSON object of string keys and values on disk
///
/// A missing file reads as empty. Every save rewrites the whole file
/// through a temporary sibling; a corrupt file is replaced by the new entry.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_all(&self) -> Result<FxHashMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(FxHashMap::default()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(FxHashMap::default());
        }
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl AccentStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StoreError::Corrupt { source, .. }) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %source,
                    "storage file is corrupt, rewriting"
                );
                FxHashMap::default()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&entries).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        // Write beside the target, then rename over it
        let temp_path = self.temp_path();
        fs::write(&temp_path, json).map_err(io_err)?;
        fs::rename(&temp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            io_err(source)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load("accentKey").unwrap(), None);
        store.save("accentKey", "cyan").unwrap();
        assert_eq!(store.load("accentKey").unwrap().as_deref(), Some("cyan"));
    }

    #[test]
    fn test_unavailable_memory_store_fails_every_call() {
        let store = MemoryStore::unavailable().with_entry("accentKey", "red");
        assert!(matches!(store.load("accentKey"), Err(StoreError::Unavailable)));
        assert!(matches!(
            store.save("accentKey", "cyan"),
            Err(StoreError::Unavailable)
        ));
        assert_eq!(store.peek("accentKey").as_deref(), Some("red"));
    }

    #[test]
    fn test_null_store() {
        assert!(NullStore.load("k").is_err());
        assert!(NullStore.save("k", "v").is_err());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load("accentKey").unwrap(), None);
    }

    #[test]
    fn test_file_store_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let store = FileStore::new(&path);
        store.save("other", "kept").unwrap();
        store.save("accentKey", "violet").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.load("accentKey").unwrap().as_deref(), Some("violet"));
        assert_eq!(reopened.load("other").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn test_file_store_corrupt_file_is_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.load("accentKey"), Err(StoreError::Corrupt { .. })));

        store.save("accentKey", "red").unwrap();
        assert_eq!(store.load("accentKey").unwrap().as_deref(), Some("red"));
        assert_eq!(store.load("other").unwrap(), None);
    }

    #[test]
    fn test_file_store_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let store = FileStore::new(&path);
        store.save("accentKey", "cyan").unwrap();
        store.save("accentKey", "violet").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("storage.json")]);
        assert_eq!(store.load("accentKey").unwrap().as_deref(), Some("violet"));
    }

    #[test]
    fn test_file_store_unwritable_target_reports_io() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way of the file
        let path = dir.path().join("storage.json");
        fs::create_dir(&path).unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.save("accentKey", "red"), Err(StoreError::Io { .. })));
        assert!(!dir.path().join("storage.json.tmp").exists());
    }
}
