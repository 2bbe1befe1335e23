//! Atomic replacement of slot files.
//!
//! Values are written to a sibling file with a `.tmp` extension, flushed, and
//! then renamed over the target. File renames within one filesystem are atomic
//! on POSIX systems, so readers observe either the previous value or the new
//! one, never a partial write.
//!
//! If the process dies before the rename, the target is untouched. A stale
//! `.tmp` file may be left behind; the next successful write overwrites it.
//!
//! # Examples
//!
//! ```no_run
//! use tracklet_kv::write_atomic;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! write_atomic("data/issues.json", br#"[]"#).await?;
//! # Ok(())
//! # }
//! ```

use crate::Result;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Atomically replaces the contents of `path` with `contents`.
///
/// # Errors
///
/// Returns an error if:
/// - The temporary file cannot be created or written
/// - The flush or sync of the temporary file fails
/// - The rename fails (e.g., cross-filesystem move)
///
/// On failure the original file, if any, is left unchanged and the temporary
/// file is removed on a best-effort basis.
pub async fn write_atomic<P>(path: P, contents: &[u8]) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, contents).await {
        // Best-effort cleanup of temp file
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    tokio::fs::rename(&temp_path, path).await?;
    tracing::trace!(path = %path.display(), bytes = contents.len(), "Atomic write complete");

    Ok(())
}

/// Creates the temporary path used while replacing `path`.
///
/// `.tmp` is appended to the existing extension (`issues.json` becomes
/// `issues.json.tmp`), or used as the extension when there is none.
pub(crate) fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

async fn write_to_temp_file(temp_path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).await?;
    file.write_all(contents).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn make_temp_path_with_extension() {
        let path = Path::new("/path/to/issues.json");
        let temp = make_temp_path(path);
        assert_eq!(temp, Path::new("/path/to/issues.json.tmp"));
    }

    #[test]
    fn make_temp_path_without_extension() {
        let path = Path::new("/path/to/issues");
        let temp = make_temp_path(path);
        assert_eq!(temp, Path::new("/path/to/issues.tmp"));
    }

    #[test]
    fn make_temp_path_relative() {
        let path = Path::new("issues.json");
        let temp = make_temp_path(path);
        assert_eq!(temp, Path::new("issues.json.tmp"));
    }

    #[tokio::test]
    async fn atomic_write_creates_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("issues.json");

        write_atomic(&target, b"[]").await.unwrap();

        let contents = tokio::fs::read_to_string(&target).await.unwrap();
        assert_eq!(contents, "[]");
    }

    #[tokio::test]
    async fn atomic_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("issues.json");
        tokio::fs::write(&target, "old content").await.unwrap();

        write_atomic(&target, br#"[{"id":"a"}]"#).await.unwrap();

        let contents = tokio::fs::read_to_string(&target).await.unwrap();
        assert_eq!(contents, r#"[{"id":"a"}]"#);
    }

    #[tokio::test]
    async fn atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("issues.json");

        write_atomic(&target, b"[]").await.unwrap();

        assert!(target.exists());
        assert!(!dir.path().join("issues.json.tmp").exists());
    }

    #[tokio::test]
    async fn atomic_write_missing_parent_fails_without_touching_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("missing").join("issues.json");

        let result = write_atomic(&target, b"[]").await;

        assert!(result.is_err());
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn atomic_write_unicode_content() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("issues.json");
        let value = "Hello \u{4e16}\u{754c} \u{1F600}";

        write_atomic(&target, value.as_bytes()).await.unwrap();

        let contents = tokio::fs::read_to_string(&target).await.unwrap();
        assert_eq!(contents, value);
    }
}
