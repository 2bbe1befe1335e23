//! Configuration management for tracklet.
//!
//! Configuration lives in `.tracklet/config.yaml` at the repository root:
//!
//! ```yaml
//! storage:
//!   backend: file
//!   data_dir: .tracklet/data
//!   key: issues
//! page:
//!   title: Issue Tracker
//!   output: .tracklet/index.html
//! ```
//!
//! Relative paths are resolved against the directory containing `.tracklet/`.

use crate::error::{Error, Result};
use crate::storage::StorageBackend;
use crate::store::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the tracklet directory
pub const TRACKLET_DIR_NAME: &str = ".tracklet";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Default data directory, relative to the root
pub const DEFAULT_DATA_DIR: &str = ".tracklet/data";

/// Default rendered page path, relative to the root
pub const DEFAULT_PAGE_OUTPUT: &str = ".tracklet/index.html";

/// Default page title
pub const DEFAULT_PAGE_TITLE: &str = "Issue Tracker";

/// Maximum directory depth to traverse when searching for the tracklet root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for tracklet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TrackletConfig {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Rendered page configuration
    #[serde(default)]
    pub page: PageConfig,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Which backend to use
    #[serde(default)]
    pub backend: BackendKind,

    /// Directory holding slot files (file backend only)
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Key the issue collection is stored under
    #[serde(default = "default_key")]
    pub key: String,
}

/// Backend selector as written in the config file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Persistent file storage
    #[default]
    File,

    /// Ephemeral in-memory storage
    Memory,
}

/// Rendered page section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageConfig {
    /// Page title
    #[serde(default = "default_title")]
    pub title: String,

    /// Where the rendered page is written
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_title() -> String {
    DEFAULT_PAGE_TITLE.to_string()
}

fn default_output() -> String {
    DEFAULT_PAGE_OUTPUT.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: default_data_dir(),
            key: default_key(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            output: default_output(),
        }
    }
}

impl TrackletConfig {
    /// Create a default configuration storing issues under `key`
    pub fn with_key(key: &str) -> Self {
        let mut config = Self::default();
        config.storage.key = key.to_string();
        config
    }

    /// Load and validate configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check the values that cannot be expressed in the YAML schema
    pub fn validate(&self) -> Result<()> {
        tracklet_kv::validate_key(&self.storage.key)
            .map_err(|e| Error::Config(format!("storage.key: {e}")))?;

        if self.storage.backend == BackendKind::File && self.storage.data_dir.trim().is_empty() {
            return Err(Error::Config("storage.data_dir cannot be empty".to_string()));
        }

        if self.page.output.trim().is_empty() {
            return Err(Error::Config("page.output cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Resolve the storage backend relative to `root`
    pub fn backend(&self, root: &Path) -> StorageBackend {
        match self.storage.backend {
            BackendKind::File => StorageBackend::File(root.join(&self.storage.data_dir)),
            BackendKind::Memory => StorageBackend::Memory,
        }
    }

    /// Resolve the rendered page path relative to `root`
    pub fn page_output(&self, root: &Path) -> PathBuf {
        root.join(&self.page.output)
    }
}

/// Find the tracklet root directory by searching up the directory tree.
///
/// Returns the directory containing `.tracklet/`, or `None` if no repository
/// is found within [`MAX_TRAVERSAL_DEPTH`] levels.
pub fn find_tracklet_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(TRACKLET_DIR_NAME).is_dir() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = TrackletConfig::default();
        assert_eq!(config.storage.backend, BackendKind::File);
        assert_eq!(config.storage.data_dir, DEFAULT_DATA_DIR);
        assert_eq!(config.storage.key, "issues");
        assert_eq!(config.page.title, DEFAULT_PAGE_TITLE);
        assert_eq!(config.page.output, DEFAULT_PAGE_OUTPUT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: TrackletConfig = serde_yaml::from_str("storage:\n  key: bugs\n").unwrap();
        assert_eq!(config.storage.key, "bugs");
        assert_eq!(config.storage.data_dir, DEFAULT_DATA_DIR);
        assert_eq!(config.page, PageConfig::default());
    }

    #[test]
    fn test_memory_backend_yaml() {
        let config: TrackletConfig = serde_yaml::from_str("storage:\n  backend: memory\n").unwrap();
        assert_eq!(config.backend(Path::new("/root")), StorageBackend::Memory);
    }

    #[test]
    fn test_backend_and_page_resolve_against_root() {
        let config = TrackletConfig::default();
        assert_eq!(
            config.backend(Path::new("/proj")),
            StorageBackend::File(PathBuf::from("/proj/.tracklet/data"))
        );
        assert_eq!(
            config.page_output(Path::new("/proj")),
            PathBuf::from("/proj/.tracklet/index.html")
        );
    }

    #[rstest]
    #[case::bad_key("storage:\n  key: ../issues\n", "storage.key")]
    #[case::empty_data_dir("storage:\n  data_dir: ''\n", "data_dir")]
    #[case::empty_output("page:\n  output: ' '\n", "page.output")]
    fn test_validate_rejects(#[case] yaml: &str, #[case] expected: &str) {
        let config: TrackletConfig = serde_yaml::from_str(yaml).unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains(expected), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        let config = TrackletConfig::with_key("bugs");

        config.save(&path).await.unwrap();
        let loaded = TrackletConfig::load(&path).await.unwrap();

        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        tokio::fs::write(&path, "storage: [not, a, map]").await.unwrap();

        let result = TrackletConfig::load(&path).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_find_root_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join(TRACKLET_DIR_NAME)).unwrap();
        let nested = temp_dir.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_tracklet_root(&nested).as_deref(), Some(temp_dir.path()));
    }

    #[test]
    fn test_find_root_ignores_plain_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(TRACKLET_DIR_NAME), "").unwrap();

        // A stray file named .tracklet is not a repository
        let found = find_tracklet_root(temp_dir.path());
        assert_ne!(found.as_deref(), Some(temp_dir.path()));
    }
}
