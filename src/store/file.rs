//! File-backed snapshot store: one file per user identity.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::atomic_write::{atomic_write_with_options, recover_bak_file, AtomicWriteOptions};
use super::snapshot::{Snapshot, SnapshotFormat};
use super::SnapshotStore;
use crate::core::UserId;
use crate::error::StoreError;

/// Stores a snapshot in a single file, overwritten in full on every save.
///
/// ```no_run
/// use bingo_tracker::core::UserId;
/// use bingo_tracker::registry::Registry;
/// use bingo_tracker::store::{FileStore, SnapshotFormat};
///
/// let user = UserId::new("egumon").unwrap();
/// let store = FileStore::for_user("data", &user, SnapshotFormat::Json);
/// assert!(store.path().ends_with("egumon.json"));
///
/// let registry = Registry::open(store).unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    format: SnapshotFormat,
    options: AtomicWriteOptions,
}

impl FileStore {
    /// Store at an explicit path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, format: SnapshotFormat) -> Self {
        Self {
            path: path.into(),
            format,
            options: AtomicWriteOptions::default(),
        }
    }

    /// Store for a user: `<data_dir>/<user>.<ext>`.
    #[must_use]
    pub fn for_user(data_dir: impl AsRef<Path>, user: &UserId, format: SnapshotFormat) -> Self {
        let file_name = format!("{}.{}", user.as_str(), format.extension());
        Self::new(data_dir.as_ref().join(file_name), format)
    }

    /// Skip `fsync` before the rename. Faster, less durable.
    #[must_use]
    pub fn without_sync(mut self) -> Self {
        self.options.sync_all = false;
        self
    }

    /// Snapshot file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encoding used for the file.
    #[must_use]
    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        recover_bak_file(&self.path);

        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let snapshot = self.format.decode(&bytes)?;
        debug!(path = %self.path.display(), cards = snapshot.len(), "Loaded snapshot");
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let bytes = self.format.encode(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        atomic_write_with_options(&self.path, &bytes, self.options).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), cards = snapshot.len(), bytes = bytes.len(), "Saved snapshot");
        Ok(())
    }
}
