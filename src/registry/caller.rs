//! Seeded ball drawer.
//!
//! Draws every number in 1-75 exactly once, in an order fixed by the seed.

use serde::{Deserialize, Serialize};

use crate::core::number::{MAX_NUMBER, MIN_NUMBER};
use crate::core::BingoRng;

/// Draws numbers without replacement.
///
/// ```
/// use bingo_tracker::registry::NumberCaller;
///
/// let mut caller = NumberCaller::new(42);
/// let first = caller.draw().unwrap();
/// assert!((1..=75).contains(&first));
/// assert_eq!(caller.remaining(), 74);
///
/// // Same seed, same order
/// assert_eq!(NumberCaller::new(42).draw(), Some(first));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberCaller {
    /// Undrawn numbers; the next draw is the last element.
    pending: Vec<u8>,
    drawn: Vec<u8>,
}

impl NumberCaller {
    /// Create a caller with a shuffled ball set.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = BingoRng::new(seed).for_context("balls");
        let mut pending: Vec<u8> = (MIN_NUMBER..=MAX_NUMBER).collect();
        rng.shuffle(&mut pending);
        Self {
            pending,
            drawn: Vec::new(),
        }
    }

    /// Draw the next number. `None` once all 75 are drawn.
    pub fn draw(&mut self) -> Option<u8> {
        let n = self.pending.pop()?;
        self.drawn.push(n);
        Some(n)
    }

    /// Numbers drawn so far, in draw order.
    #[must_use]
    pub fn drawn(&self) -> &[u8] {
        &self.drawn
    }

    /// Numbers left to draw.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Check if every number has been drawn.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }
}
