//! Application context for CLI command execution.
//!
//! [`App`] locates the repository, loads its configuration, and opens the
//! [`IssueStore`] the commands operate on.
//!
//! # Example
//!
//! ```no_run
//! use tracklet::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut app = App::from_directory(Path::new(".")).await?;
//!     app.store_mut().refresh().await?;
//!     app.write_page(None).await?;
//!     Ok(())
//! }
//! ```

use crate::config::{CONFIG_FILE_NAME, TRACKLET_DIR_NAME, TrackletConfig, find_tracklet_root};
use crate::error::{Error, Result};
use crate::render::render_page;
use crate::storage::create_storage;
use crate::store::IssueStore;
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
#[derive(Debug)]
pub struct App {
    store: IssueStore,
    root: PathBuf,
    config: TrackletConfig,
}

impl App {
    /// Create an App from the given working directory.
    ///
    /// Searches up the directory tree for `.tracklet/`, loads its
    /// configuration, and opens the configured storage.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tracklet repository is found in the directory tree
    /// - Configuration cannot be loaded or is invalid
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root = find_tracklet_root(working_dir).ok_or(Error::NotInitialized)?;
        let config_path = root.join(TRACKLET_DIR_NAME).join(CONFIG_FILE_NAME);
        let config = TrackletConfig::load(&config_path).await?;

        let storage = create_storage(config.backend(&root));
        let store = IssueStore::with_key(storage, config.storage.key.clone())?;

        tracing::debug!(root = %root.display(), key = %config.storage.key, "Opened tracklet repository");

        Ok(Self {
            store,
            root,
            config,
        })
    }

    /// Get an immutable reference to the store.
    pub fn store(&self) -> &IssueStore {
        &self.store
    }

    /// Get a mutable reference to the store.
    pub fn store_mut(&mut self) -> &mut IssueStore {
        &mut self.store
    }

    /// The directory containing `.tracklet/`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The loaded configuration.
    pub fn config(&self) -> &TrackletConfig {
        &self.config
    }

    /// Write the full HTML page around the store's current listing.
    ///
    /// Writes to `output` if given, otherwise to the configured page path.
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub async fn write_page(&self, output: Option<&Path>) -> Result<PathBuf> {
        let path = output.map_or_else(|| self.config.page_output(&self.root), Path::to_path_buf);
        let html = render_page(&self.config.page.title, self.store.listing().content())?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tracklet_kv::write_atomic(&path, html.as_bytes()).await?;

        tracing::debug!(path = %path.display(), "Wrote page");
        Ok(path)
    }
}
