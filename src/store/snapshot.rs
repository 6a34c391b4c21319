//! Persisted snapshot of a registry's cards, and its on-disk encodings.
//!
//! ## JSON Layout (version 1)
//!
//! ```json
//! {
//!   "version": 1,
//!   "cards": [
//!     {
//!       "card_number": 5890,
//!       "numbers": [[13, 22, 42, 49, 61], "..."],
//!       "marked": [[true, false, false, false, false], "..."],
//!       "bingo_lines": ["row_0", "diagonal1"]
//!     }
//!   ]
//! }
//! ```
//!
//! A bare top-level array of card records is read as an unversioned
//! (version 0) file. Called numbers are not part of the snapshot.
//!
//! Decoding fails closed: any shape, version, or naming problem is a
//! `CorruptSnapshot` error rather than a silently dropped card.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cards::{CardSnapshot, Grid, Line, Marks, SIZE};
use crate::core::CardId;
use crate::error::{BingoError, StoreError};

/// Newest snapshot version this crate reads and the one it writes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Ordered card states of one registry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub cards: Vec<CardSnapshot>,
}

impl Snapshot {
    /// Create a snapshot from card states in registration order.
    #[must_use]
    pub fn new(cards: Vec<CardSnapshot>) -> Self {
        Self { cards }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the snapshot has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// On-disk encoding of a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// Human-readable JSON records.
    #[default]
    Json,
    /// Compact binary encoding of the same versioned records.
    Bincode,
}

impl SnapshotFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            SnapshotFormat::Json => "json",
            SnapshotFormat::Bincode => "bin",
        }
    }

    /// Encode a snapshot.
    pub fn encode(self, snapshot: &Snapshot) -> Result<Vec<u8>, StoreError> {
        match self {
            SnapshotFormat::Json => {
                let file = VersionedFile {
                    version: SNAPSHOT_VERSION,
                    cards: snapshot.cards.iter().map(CardRecord::from).collect(),
                };
                serde_json::to_vec_pretty(&file).map_err(|e| StoreError::Encode(e.to_string()))
            }
            SnapshotFormat::Bincode => {
                let file = VersionedFile {
                    version: SNAPSHOT_VERSION,
                    cards: snapshot.cards.clone(),
                };
                bincode::serialize(&file).map_err(|e| StoreError::Encode(e.to_string()))
            }
        }
    }

    /// Decode a snapshot, validating its shape.
    pub fn decode(self, bytes: &[u8]) -> Result<Snapshot, BingoError> {
        match self {
            SnapshotFormat::Json => decode_json(bytes),
            SnapshotFormat::Bincode => {
                let file: VersionedFile<CardSnapshot> = bincode::deserialize(bytes)
                    .map_err(|e| BingoError::corrupt(format!("undecodable binary snapshot: {e}")))?;
                check_version(file.version)?;
                Ok(Snapshot::new(file.cards))
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
struct VersionedFile<T> {
    version: u32,
    cards: Vec<T>,
}

/// One card as written to JSON.
#[derive(Serialize, Deserialize)]
struct CardRecord {
    card_number: CardNumber,
    numbers: Vec<Vec<u8>>,
    marked: Vec<Vec<bool>>,
    bingo_lines: Vec<Line>,
}

/// Card ids are integers in older files and arbitrary text in newer ones.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CardNumber {
    Number(i64),
    Text(String),
}

impl From<&CardSnapshot> for CardRecord {
    fn from(card: &CardSnapshot) -> Self {
        let card_number = match card.id.as_number() {
            Some(n) => CardNumber::Number(n),
            None => CardNumber::Text(card.id.as_str().to_string()),
        };

        Self {
            card_number,
            numbers: card.grid.rows().iter().map(|row| row.to_vec()).collect(),
            marked: card.marked.iter().map(|row| row.to_vec()).collect(),
            bingo_lines: card.completed.iter().collect(),
        }
    }
}

impl TryFrom<CardRecord> for CardSnapshot {
    type Error = BingoError;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        let id = match record.card_number {
            CardNumber::Number(n) => CardId::from(n),
            CardNumber::Text(s) => CardId::new(s),
        };

        let grid = Grid::from_rows(record.numbers)
            .map_err(|e| BingoError::corrupt(format!("card {id}: numbers: {e}")))?;

        if record.marked.len() != SIZE || record.marked.iter().any(|row| row.len() != SIZE) {
            return Err(BingoError::corrupt(format!("card {id}: marked must be 5x5")));
        }
        let mut marked: Marks = [[false; SIZE]; SIZE];
        for (r, row) in record.marked.iter().enumerate() {
            marked[r].copy_from_slice(row);
        }

        Ok(CardSnapshot {
            id,
            grid,
            marked,
            completed: record.bingo_lines.into_iter().collect(),
        })
    }
}

fn check_version(version: u32) -> Result<(), BingoError> {
    if version > SNAPSHOT_VERSION {
        return Err(BingoError::corrupt(format!(
            "unsupported snapshot version {version} (newest known is {SNAPSHOT_VERSION})"
        )));
    }
    Ok(())
}

fn decode_json(bytes: &[u8]) -> Result<Snapshot, BingoError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| BingoError::corrupt(format!("invalid JSON: {e}")))?;

    let cards = match value {
        legacy @ Value::Array(_) => legacy,
        Value::Object(mut file) => {
            let version = file
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| BingoError::corrupt("missing or invalid \"version\""))?;
            let version = u32::try_from(version)
                .map_err(|_| BingoError::corrupt(format!("unsupported snapshot version {version}")))?;
            check_version(version)?;
            file.remove("cards")
                .ok_or_else(|| BingoError::corrupt("missing \"cards\""))?
        }
        _ => return Err(BingoError::corrupt("expected an object or an array of cards")),
    };

    let records: Vec<CardRecord> = serde_json::from_value(cards)
        .map_err(|e| BingoError::corrupt(format!("invalid card record: {e}")))?;

    let cards = records
        .into_iter()
        .map(CardSnapshot::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Snapshot::new(cards))
}
