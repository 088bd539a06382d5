//! Key-value storage backends for the persisted employee blob.
//!
//! A backend holds opaque string blobs under named slots. The store reads its
//! slot once when opened and rewrites it in full after every mutation.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use staffbook_core::error::CoreError;

/// Failure inside a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid storage slot name: {0:?}")]
    InvalidSlot(String),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        CoreError::Internal(err.to_string())
    }
}

/// A synchronous slot -> blob store owned by a single writer.
pub trait KeyValueStorage {
    /// Read the blob stored under `slot`, or `None` if the slot is empty.
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `slot`.
    fn set(&mut self, slot: &str, blob: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Process-local backend, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with one slot.
    pub fn with_slot(slot: &str, blob: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(slot.to_string(), blob.into());
        Self { slots }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(slot).cloned())
    }

    fn set(&mut self, slot: &str, blob: &str) -> Result<(), StorageError> {
        self.slots.insert(slot.to_string(), blob.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File backend
// ---------------------------------------------------------------------------

/// Directory-backed storage: each slot is a `<slot>.json` file.
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so a reader never observes a half-written blob.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `slot`.
    pub fn slot_path(&self, slot: &str) -> Result<PathBuf, StorageError> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !slot.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidSlot(slot.to_string()));
        }
        Ok(self.dir.join(format!("{slot}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(slot)?;
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, slot: &str, blob: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot)?;
        fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips_slots() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("employees").unwrap(), None);
        storage.set("employees", "[]").unwrap();
        assert_eq!(storage.get("employees").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.get("other").unwrap(), None);
    }

    #[test]
    fn file_storage_missing_slot_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.get("employees").unwrap(), None);
    }

    #[test]
    fn file_storage_writes_slot_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("data"));
        storage.set("employees", "[1]").unwrap();
        storage.set("employees", "[2]").unwrap();

        let path = dir.path().join("data").join("employees.json");
        assert_eq!(fs::read_to_string(path).unwrap(), "[2]");
        assert!(!dir.path().join("data").join("employees.json.tmp").exists());
        assert_eq!(storage.get("employees").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn file_storage_rejects_path_like_slots() {
        let storage = FileStorage::new("/tmp/unused");
        for slot in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(storage.slot_path(slot), Err(StorageError::InvalidSlot(_))),
                "{slot}"
            );
        }
    }

    #[test]
    fn storage_error_becomes_internal_core_error() {
        let err: CoreError = StorageError::InvalidSlot("a/b".into()).into();
        assert_eq!(err.kind(), "INTERNAL_ERROR");
    }
}
