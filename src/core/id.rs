//! Identifiers: cards within a registry, users across stores.
//!
//! ## CardId
//!
//! Opaque, immutable, unique within one `Registry`. Printed cards carry
//! numeric serials (e.g. `5890`), so ids are often decimal text, but any
//! string is accepted.
//!
//! ## UserId
//!
//! Keys one persisted snapshot. Restricted to a file-name-safe alphabet so
//! a store can map it directly to a path.
//!
//! ```
//! use bingo_tracker::core::{CardId, UserId};
//!
//! let card = CardId::from(5890u64);
//! assert_eq!(card.as_str(), "5890");
//! assert_eq!(card.as_number(), Some(5890));
//!
//! let user = UserId::new("egumon").unwrap();
//! assert_eq!(user.as_str(), "egumon");
//! assert!(UserId::new("../etc").is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::BingoError;

/// Identifier of a card within a registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Create a card ID from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the ID, if it is written in canonical decimal form.
    ///
    /// `"5890"` is numeric; `"05890"` and `"A-12"` are not, so they keep
    /// their exact text when persisted.
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        let n: i64 = self.0.parse().ok()?;
        (n.to_string() == self.0).then_some(n)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for CardId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for CardId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity owning one persisted snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Maximum accepted length, in bytes.
    pub const MAX_LEN: usize = 64;

    /// Validate and create a user ID.
    ///
    /// Accepts ASCII letters, digits, `-` and `_`, up to `MAX_LEN` bytes.
    pub fn new(id: impl Into<String>) -> Result<Self, BingoError> {
        let id = id.into();
        let valid = !id.is_empty()
            && id.len() <= Self::MAX_LEN
            && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if valid {
            Ok(Self(id))
        } else {
            Err(BingoError::InvalidUserId(id))
        }
    }

    /// Get the raw ID text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = BingoError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
