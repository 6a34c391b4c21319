//! Snapshot persistence.
//!
//! The registry hands a full `Snapshot` to its store after every state
//! change; stores overwrite whatever they held before. The last successful
//! save wins.
//!
//! ## Stores
//!
//! - `MemoryStore`: keeps the last snapshot in memory (default, tests)
//! - `FileStore`: one file per user identity, atomic whole-file writes

pub mod atomic_write;
pub mod file;
pub mod snapshot;

pub use atomic_write::{atomic_write, atomic_write_with_options, recover_bak_file, AtomicWriteOptions};
pub use file::FileStore;
pub use snapshot::{Snapshot, SnapshotFormat, SNAPSHOT_VERSION};

use crate::error::StoreError;

/// Backend that persists registry snapshots.
pub trait SnapshotStore {
    /// Read the stored snapshot. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;

    /// Replace the stored snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// In-memory store. Counts saves so callers can observe persistence.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    snapshot: Option<Snapshot>,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with a snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            saves: 0,
        }
    }

    /// Last saved snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Number of saves so far.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        (**self).save(snapshot)
    }
}
