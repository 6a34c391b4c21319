//! Whole-file replacement through a temp file and rename.
//!
//! Readers see either the previous snapshot or the new one, never a torn
//! write. On Windows, rename-over-existing can fail; a backup of the old
//! file is moved aside first and restored if the rename still fails.
//! A crash inside that window leaves only the backup, which
//! `recover_bak_file` puts back before the next read.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct AtomicWriteOptions {
    /// When true, `sync_all()` is called on the temp file before persisting.
    pub sync_all: bool,
}

impl Default for AtomicWriteOptions {
    fn default() -> Self {
        Self { sync_all: true }
    }
}

/// Restore `path` from `path.bak` left behind by an interrupted write.
///
/// Does nothing unless `path` is missing and the backup exists.
pub fn recover_bak_file(path: &Path) {
    let backup = path.with_extension("bak");
    if !path.exists() && backup.exists() {
        match std::fs::rename(&backup, path) {
            Ok(()) => warn!(path = %path.display(), "Recovered snapshot from interrupted write"),
            Err(e) => warn!(path = %path.display(), "Failed to recover snapshot backup: {e}"),
        }
    }
}

pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8]) -> std::io::Result<()> {
    atomic_write_with_options(path, bytes, AtomicWriteOptions::default())
}

pub fn atomic_write_with_options(
    path: impl AsRef<Path>,
    bytes: &[u8],
    options: AtomicWriteOptions,
) -> std::io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    if options.sync_all {
        tmp.as_file().sync_all()?;
    }

    let err = match tmp.persist(path) {
        Ok(_) => return Ok(()),
        Err(err) => err,
    };

    if !path.exists() {
        return Err(err.error);
    }

    // Rename-over-existing failed: move the old file aside and retry.
    let backup = path.with_extension("bak");
    std::fs::rename(path, &backup)?;
    match err.file.persist(path) {
        Ok(_) => {
            if let Err(e) = std::fs::remove_file(&backup) {
                debug!(path = %backup.display(), "Failed to remove snapshot backup: {e}");
            }
            Ok(())
        }
        Err(retry) => {
            std::fs::rename(&backup, path)?;
            Err(retry.error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        atomic_write(&path, b"first").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"first");
    }

    #[test]
    fn test_atomic_write_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        atomic_write(&path, b"first").unwrap();
        atomic_write_with_options(&path, b"second", AtomicWriteOptions { sync_all: false })
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert!(!path.with_extension("bak").exists());
        // Only the snapshot itself remains; no stray temp files
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_recover_bak_file_restores_missing_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(path.with_extension("bak"), b"saved").unwrap();

        recover_bak_file(&path);

        assert_eq!(std::fs::read(&path).unwrap(), b"saved");
        assert!(!path.with_extension("bak").exists());
    }

    #[test]
    fn test_recover_bak_file_keeps_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, b"current").unwrap();
        std::fs::write(path.with_extension("bak"), b"stale").unwrap();

        recover_bak_file(&path);

        assert_eq!(std::fs::read(&path).unwrap(), b"current");
        assert!(path.with_extension("bak").exists());
    }

    #[test]
    fn test_atomic_write_missing_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("snapshot.json");
        assert!(atomic_write(&path, b"data").is_err());
    }
}
