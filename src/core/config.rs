//! Tracker configuration.
//!
//! Collaborators build a `TrackerConfig` (in code or from a TOML file) and
//! use it to open one registry per user identity.
//!
//! ```toml
//! data_dir = "/var/lib/bingo"
//! format = "json"          # or "bincode"
//! strict_numbers = true
//! sync_writes = true
//! seed = 42
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::id::UserId;
use crate::error::{BingoError, Result, StoreError};
use crate::registry::{NumberCaller, Registry};
use crate::store::{FileStore, SnapshotFormat};

/// Tracker configuration. Missing TOML keys take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Directory holding one snapshot file per user.
    pub data_dir: PathBuf,

    /// Snapshot encoding.
    pub format: SnapshotFormat,

    /// Reject cards with out-of-range or repeated numbers on registration.
    pub strict_numbers: bool,

    /// `fsync` snapshot files before replacing the previous one.
    pub sync_writes: bool,

    /// Seed for automatic number calling.
    pub seed: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("bingo-data"),
            format: SnapshotFormat::Json,
            strict_numbers: false,
            sync_writes: true,
            seed: 42,
        }
    }
}

impl TrackerConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| BingoError::InvalidConfig(e.to_string()))
    }

    /// Load from a TOML file. A missing file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(BingoError::InvalidConfig(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Set the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the snapshot format.
    #[must_use]
    pub fn with_format(mut self, format: SnapshotFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable the registration number policy.
    #[must_use]
    pub fn with_strict_numbers(mut self, strict: bool) -> Self {
        self.strict_numbers = strict;
        self
    }

    /// Enable or disable `fsync` on snapshot writes.
    #[must_use]
    pub fn with_sync_writes(mut self, sync: bool) -> Self {
        self.sync_writes = sync;
        self
    }

    /// Set the calling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Snapshot file for a user.
    #[must_use]
    pub fn snapshot_path(&self, user: &UserId) -> PathBuf {
        self.file_store(user).path().to_path_buf()
    }

    /// File store for a user.
    #[must_use]
    pub fn file_store(&self, user: &UserId) -> FileStore {
        let store = FileStore::for_user(&self.data_dir, user, self.format);
        if self.sync_writes {
            store
        } else {
            store.without_sync()
        }
    }

    /// Open a user's registry from their snapshot file.
    pub fn open_registry(&self, user: &UserId) -> std::result::Result<Registry<FileStore>, StoreError> {
        let registry = Registry::open(self.file_store(user))?;
        Ok(registry.with_strict_numbers(self.strict_numbers))
    }

    /// Ball drawer seeded from this config.
    #[must_use]
    pub fn number_caller(&self) -> NumberCaller {
        NumberCaller::new(self.seed)
    }
}
