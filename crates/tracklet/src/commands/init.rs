//! Implementation of the `init` command.
//!
//! Creates the `.tracklet/` directory with a default configuration and an
//! empty data directory. No issue blob is written; the first load of a fresh
//! repository sees an absent key and yields an empty collection.

use crate::config::{CONFIG_FILE_NAME, TRACKLET_DIR_NAME, TrackletConfig};
use crate::error::{Error, Result};
use crate::store::DEFAULT_STORAGE_KEY;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the gitignore file within .tracklet
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created tracklet directory
    pub tracklet_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created data directory, if the backend uses one
    pub data_dir: Option<PathBuf>,
    /// The key issues are stored under
    pub key: String,
}

/// Initialize a new tracklet repository in `base_dir`.
///
/// # Arguments
///
/// * `base_dir` - The directory where `.tracklet/` will be created
/// * `key` - Optional storage key (defaults to `issues`)
///
/// # Errors
///
/// Returns an error if:
/// - The `.tracklet/` directory already exists
/// - The key is invalid
/// - File system operations fail
pub async fn init(base_dir: &Path, key: Option<&str>) -> Result<InitResult> {
    let key = key.unwrap_or(DEFAULT_STORAGE_KEY).trim();
    let config = TrackletConfig::with_key(key);
    config.validate()?;

    let tracklet_dir = base_dir.join(TRACKLET_DIR_NAME);
    if tracklet_dir.exists() {
        return Err(Error::Config(format!(
            "Tracklet is already initialized in this directory. Found existing '{TRACKLET_DIR_NAME}'"
        )));
    }

    fs::create_dir_all(&tracklet_dir).await?;

    let config_file = tracklet_dir.join(CONFIG_FILE_NAME);
    config.save(&config_file).await?;

    let data_dir = config.backend(base_dir).data_dir().map(Path::to_path_buf);
    if let Some(dir) = &data_dir {
        fs::create_dir_all(dir).await?;
    }

    let gitignore_content = "\
# The rendered page is rebuilt on every change
index.html
";
    fs::write(tracklet_dir.join(GITIGNORE_FILE_NAME), gitignore_content).await?;

    tracing::info!(dir = %tracklet_dir.display(), key, "Initialized tracklet repository");

    Ok(InitResult {
        tracklet_dir,
        config_file,
        data_dir,
        key: key.to_string(),
    })
}
