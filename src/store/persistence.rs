//! Key-value persistence for the node store.
//!
//! The store is mirrored under two keys, one JSON array per collection.
//! Loading falls back to the seed collection for any key that is missing or
//! cannot be decoded.

use crate::error::StorageError;
use crate::store::seed;
use crate::tree::node::{FileNode, FolderNode};
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage key holding the file collection
pub const FILES_KEY: &str = "fs_files";

/// Storage key holding the folder collection
pub const FOLDERS_KEY: &str = "fs_folders";

/// Durable key-value storage the store writes through to
pub trait KeyValueBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Human-readable location for status output
    fn describe(&self) -> String;
}

/// In-process backend; contents vanish with the process.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Directory backend: one `<key>.json` file per key.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open a backend rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            StorageError::Io(format!(
                "Failed to create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let staging = self.dir.join(format!("{}.json.tmp", key));
        std::fs::write(&staging, value).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", staging.display(), e))
        })?;
        std::fs::rename(&staging, &path).map_err(|e| {
            StorageError::Io(format!("Failed to replace {}: {}", path.display(), e))
        })
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Both collections, as exported or persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub files: Vec<FileNode>,
    pub folders: Vec<FolderNode>,
}

/// Load both collections, substituting seed data per missing or unreadable key.
pub fn load_snapshot(backend: &dyn KeyValueBackend) -> Snapshot {
    let now = Utc::now();
    let files = load_collection(backend, FILES_KEY).unwrap_or_else(|| seed::seed_files(now));
    let folders =
        load_collection(backend, FOLDERS_KEY).unwrap_or_else(|| seed::seed_folders(now));
    debug!(
        files = files.len(),
        folders = folders.len(),
        backend = %backend.describe(),
        "Loaded filesystem snapshot"
    );
    Snapshot { files, folders }
}

fn load_collection<T: serde::de::DeserializeOwned>(
    backend: &dyn KeyValueBackend,
    key: &str,
) -> Option<Vec<T>> {
    let raw = match backend.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No persisted collection, using seed data");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted collection, using seed data");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Some(items),
        Err(e) => {
            warn!(key, error = %e, "Persisted collection is not valid, using seed data");
            None
        }
    }
}

/// Write both collections through to the backend.
pub fn save_collections(
    backend: &dyn KeyValueBackend,
    files: &[FileNode],
    folders: &[FolderNode],
) -> Result<(), StorageError> {
    backend.write(FILES_KEY, &serde_json::to_string(files)?)?;
    backend.write(FOLDERS_KEY, &serde_json::to_string(folders)?)?;
    Ok(())
}
