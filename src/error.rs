//! Error types for the tracker.
//!
//! - `BingoError`: rejected card, registry, or snapshot operations
//! - `StoreError`: persistence backend failures
//!
//! Every `BingoError` returned by a registry operation leaves the registry
//! exactly as it was before the call.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::CardId;

/// Result type alias using `BingoError`.
pub type Result<T> = std::result::Result<T, BingoError>;

/// Errors raised by cards and the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BingoError {
    #[error("grid must be 5x5, got {rows} rows with a row of {cols} cells")]
    InvalidGridShape { rows: usize, cols: usize },

    #[error("card {0} is already registered")]
    DuplicateCardId(CardId),

    #[error("card {0} not found")]
    CardNotFound(CardId),

    #[error("number {0} is outside 1-75")]
    OutOfRange(u8),

    #[error("number {0} has already been called")]
    AlreadyCalled(u8),

    #[error("number {number} at row {row}, column {col} is outside 1-75")]
    NumberOutOfRange { number: u8, row: usize, col: usize },

    #[error("number {0} appears more than once on the card")]
    DuplicateNumber(u8),

    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("invalid user id {0:?}")]
    InvalidUserId(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BingoError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptSnapshot(reason.into())
    }
}

/// Errors raised by snapshot stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(String),

    #[error(transparent)]
    Corrupt(#[from] BingoError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(BingoError::OutOfRange(76).to_string(), "number 76 is outside 1-75");
        assert_eq!(
            BingoError::DuplicateCardId(CardId::new("5890")).to_string(),
            "card 5890 is already registered"
        );
        assert_eq!(
            BingoError::InvalidGridShape { rows: 4, cols: 5 }.to_string(),
            "grid must be 5x5, got 4 rows with a row of 5 cells"
        );
    }

    #[test]
    fn test_store_error_wraps_corrupt() {
        let err: StoreError = BingoError::corrupt("bad version").into();
        assert!(matches!(err, StoreError::Corrupt(BingoError::CorruptSnapshot(_))));
        assert_eq!(err.to_string(), "corrupt snapshot: bad version");
    }
}
