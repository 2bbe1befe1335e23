//! File-backed slot store.
//!
//! Each key is stored as `<dir>/<key>.json`. Writes go through
//! [`write_atomic`](crate::write_atomic), so a crash mid-write never leaves a
//! truncated slot.

use crate::{KeyValueStore, Result, validate_key, write_atomic};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension used for slot files
pub const SLOT_EXTENSION: &str = "json";

/// Persistent [`KeyValueStore`] holding one file per key.
///
/// The directory is created lazily on the first write; a store whose
/// directory does not exist yet simply reads as empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// The key is not validated here; callers go through the trait methods.
    #[must_use]
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{SLOT_EXTENSION}"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.slot_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.slot_path(key);
        write_atomic(&path, value.as_bytes()).await?;
        debug!(key, path = %path.display(), bytes = value.len(), "Stored slot");
        Ok(())
    }

    async fn remove_item(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.slot_path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, path = %path.display(), "Removed slot");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SLOT_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if validate_key(stem).is_ok() && entry.file_type().await?.is_file() {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_path() {
        let store = FileStore::new("/data");
        assert_eq!(store.slot_path("issues"), Path::new("/data/issues.json"));
    }

    #[test]
    fn test_dir_accessor() {
        let store = FileStore::new("/data");
        assert_eq!(store.dir(), Path::new("/data"));
    }
}
