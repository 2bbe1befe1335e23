//! Storage backend selection.
//!
//! Maps a configured backend onto a boxed
//! [`KeyValueStore`](tracklet_kv::KeyValueStore) from `tracklet-kv`:
//!
//! - **Memory**: ephemeral, useful for tests and dry runs
//! - **File**: one JSON file per key in a data directory

use std::path::{Path, PathBuf};
use tracklet_kv::{FileStore, KeyValueStore, MemoryStore};

/// Storage backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// In-memory storage (ephemeral)
    Memory,

    /// File storage rooted at the given directory (persistent)
    File(PathBuf),
}

impl StorageBackend {
    /// Returns the data directory for file-based backends.
    pub fn data_dir(&self) -> Option<&Path> {
        match self {
            StorageBackend::File(dir) => Some(dir),
            StorageBackend::Memory => None,
        }
    }
}

/// Create a key-value store for the given backend.
///
/// # Example
///
/// ```
/// use tracklet::storage::{create_storage, StorageBackend};
///
/// let storage = create_storage(StorageBackend::Memory);
/// # let _ = storage;
/// ```
pub fn create_storage(backend: StorageBackend) -> Box<dyn KeyValueStore> {
    match backend {
        StorageBackend::Memory => Box::new(MemoryStore::new()),
        StorageBackend::File(dir) => {
            tracing::debug!(dir = %dir.display(), "Using file storage");
            Box::new(FileStore::new(dir))
        }
    }
}
