//! # bingo-tracker
//!
//! Tracks 5×5 bingo cards against a stream of called numbers, reports each
//! completed line exactly once, and persists card state per user.
//!
//! ## Design Principles
//!
//! 1. **Edge-Triggered Wins**: A line is reported on the call that
//!    completes it and never again. Cards keep accepting marks after
//!    their first win.
//!
//! 2. **No Partial Mutation**: Every rejected operation leaves the
//!    registry unchanged.
//!
//! 3. **Explicit State**: Collaborators own `Registry` values (one per
//!    user); there is no ambient session state.
//!
//! ## Control Flow
//!
//! A collaborator parses operator input with `parse_called_number`, calls
//! `Registry::call_number`, and renders the returned `CallResult`. The
//! registry forwards the number to every card, aggregates newly completed
//! lines, and saves a full snapshot to its `SnapshotStore`.
//!
//! ## Modules
//!
//! - `core`: Identifiers, number parsing, RNG, configuration
//! - `cards`: Grids, lines, cards, card snapshots
//! - `registry`: Card collection, call results, bingo history, ball drawer
//! - `store`: Snapshot format and persistence backends
//! - `error`: Error types

pub mod cards;
pub mod core;
pub mod error;
pub mod registry;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    parse_called_number, BingoRng, CardId, InputError, TrackerConfig, UserId,
    MAX_NUMBER, MIN_NUMBER,
};

pub use crate::cards::{Card, CardSnapshot, CardStatus, Grid, Line, LineKind, LineSet};

pub use crate::registry::{BingoRecord, CallResult, CardCallResult, NumberCaller, Registry};

pub use crate::store::{FileStore, MemoryStore, Snapshot, SnapshotFormat, SnapshotStore};

pub use crate::error::{BingoError, Result, StoreError};
