//! The 5×5 number grid printed on a card.
//!
//! The center cell `(2, 2)` is FREE. Its stored value (conventionally `0`)
//! is never matched against called numbers; it counts as marked by position.
//!
//! ## Standard Layout
//!
//! `Grid::random` follows the usual 75-ball layout, one range per column:
//!
//! | B    | I     | N     | G     | O     |
//! |------|-------|-------|-------|-------|
//! | 1-15 | 16-30 | 31-45 | 46-60 | 61-75 |

use std::ops::RangeInclusive;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::number::is_callable;
use crate::core::BingoRng;
use crate::error::{BingoError, Result};

/// Rows and columns per card.
pub const SIZE: usize = 5;

/// Position of the FREE cell.
pub const FREE_CELL: (usize, usize) = (2, 2);

/// Value conventionally stored in the FREE cell.
pub const FREE_VALUE: u8 = 0;

/// Check whether `(row, col)` is the FREE cell.
#[must_use]
pub const fn is_free(row: usize, col: usize) -> bool {
    row == FREE_CELL.0 && col == FREE_CELL.1
}

/// A validated 5×5 grid of card numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: [[u8; SIZE]; SIZE],
}

impl Grid {
    /// Create a grid from a fixed-size array. Always 5×5.
    #[must_use]
    pub const fn new(cells: [[u8; SIZE]; SIZE]) -> Self {
        Self { cells }
    }

    /// Create a grid from nested rows, validating the shape.
    ///
    /// ```
    /// use bingo_tracker::cards::Grid;
    /// use bingo_tracker::BingoError;
    ///
    /// let short = vec![vec![1, 2, 3, 4, 5]; 4];
    /// assert_eq!(
    ///     Grid::from_rows(short),
    ///     Err(BingoError::InvalidGridShape { rows: 4, cols: 5 })
    /// );
    /// ```
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let shape_error = || BingoError::InvalidGridShape {
            rows: rows.len(),
            cols: rows
                .iter()
                .map(Vec::len)
                .find(|&len| len != SIZE)
                .unwrap_or_else(|| rows.first().map_or(0, Vec::len)),
        };

        if rows.len() != SIZE || rows.iter().any(|row| row.len() != SIZE) {
            return Err(shape_error());
        }

        let mut cells = [[0u8; SIZE]; SIZE];
        for (r, row) in rows.iter().enumerate() {
            cells[r].copy_from_slice(row);
        }
        Ok(Self { cells })
    }

    /// Generate a card in the standard column layout with a `0` FREE cell.
    ///
    /// Numbers are unique within the card.
    pub fn random(rng: &mut BingoRng) -> Self {
        let mut cells = [[FREE_VALUE; SIZE]; SIZE];

        for col in 0..SIZE {
            let mut pool: Vec<u8> = Self::column_range(col).collect();
            rng.shuffle(&mut pool);
            for row in 0..SIZE {
                if !is_free(row, col) {
                    cells[row][col] = pool[row];
                }
            }
        }

        Self { cells }
    }

    /// Numbers that belong in column `col` of a standard card.
    ///
    /// Panics if `col >= SIZE`.
    #[must_use]
    pub fn column_range(col: usize) -> RangeInclusive<u8> {
        assert!(col < SIZE, "column index out of range");
        let low = col as u8 * 15 + 1;
        low..=low + 14
    }

    /// Value at a position.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[[u8; SIZE]; SIZE] {
        &self.cells
    }

    /// Positions of the non-FREE cells holding `n`.
    pub fn positions_of(&self, n: u8) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..SIZE)
            .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
            .filter(move |&(r, c)| !is_free(r, c) && self.cells[r][c] == n)
    }

    /// Check whether `n` appears in any non-FREE cell.
    #[must_use]
    pub fn contains(&self, n: u8) -> bool {
        self.positions_of(n).next().is_some()
    }

    /// Boundary policy for hand-entered cards.
    ///
    /// Non-FREE values must be callable (1-75) and unique within the card.
    /// The FREE cell's value is ignored.
    pub fn check_numbers(&self) -> Result<()> {
        let mut seen = FxHashSet::default();

        for (row, values) in self.cells.iter().enumerate() {
            for (col, &number) in values.iter().enumerate() {
                if is_free(row, col) {
                    continue;
                }
                if !is_callable(number) {
                    return Err(BingoError::NumberOutOfRange { number, row, col });
                }
                if !seen.insert(number) {
                    return Err(BingoError::DuplicateNumber(number));
                }
            }
        }

        Ok(())
    }
}

impl From<[[u8; SIZE]; SIZE]> for Grid {
    fn from(cells: [[u8; SIZE]; SIZE]) -> Self {
        Self::new(cells)
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = BingoError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}
