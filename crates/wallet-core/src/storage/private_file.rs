//! Owner-only file persistence
//!
//! Everything under the Shelby home directory may hold key material, so all
//! writes go through [`write_private`]: content lands in a fresh 0600 temp
//! file next to the target, is synced, and is then renamed over the target.
//! The target is never observable half-written or with wider permissions.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::Result;

#[cfg(unix)]
const PRIVATE_FILE_MODE: u32 = 0o600;
#[cfg(unix)]
const PRIVATE_DIR_MODE: u32 = 0o700;

/// Create `dir` (and parents) with owner-only permissions if it is missing
pub async fn ensure_private_dir(dir: &Path) -> Result<()> {
    if tokio::fs::try_exists(dir).await? {
        return Ok(());
    }

    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(PRIVATE_DIR_MODE);
    builder.create(dir).await?;

    debug!("Created directory {:?}", dir);
    Ok(())
}

/// Atomically replace `path` with `contents`, readable by the owner only
pub async fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_private_dir(parent).await?;
    }

    let temp_path = temp_path_for(path);

    // A leftover temp file may carry other permissions; create_new below
    // guarantees the mode we set is the one the file is born with.
    match tokio::fs::remove_file(&temp_path).await {
        Ok(()) => debug!("Removed stale temp file {:?}", temp_path),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    if let Err(e) = write_new_file(&temp_path, contents).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    tokio::fs::rename(&temp_path, path).await?;

    debug!("Wrote {} bytes to {:?}", contents.len(), path);
    Ok(())
}

/// Read a file to a string, mapping "does not exist" to `None`
pub async fn read_optional(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn write_new_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(PRIVATE_FILE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    path.with_extension("tmp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("secret.json");

        write_private(&path, b"first").await.unwrap();
        write_private(&path, b"second").await.unwrap();

        let contents = read_optional(&path).await.unwrap();
        assert_eq!(contents.as_deref(), Some("second"));
        assert!(!temp_path_for(&path).exists());
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        assert!(read_optional(&missing).await.unwrap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("home");
        let path = dir.join("config.yaml");

        // Pre-existing world-readable target and stale temp file
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        std::fs::write(temp_path_for(&path), "stale").unwrap();
        std::fs::set_permissions(temp_path_for(&path), std::fs::Permissions::from_mode(0o666))
            .unwrap();

        write_private(&path, b"new").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_created_dir_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("accounts");

        ensure_private_dir(&dir).await.unwrap();

        let mode = std::fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }
}
