//! A bingo card: its grid, mark state, and completed-line history.
//!
//! ## Lifecycle
//!
//! - Created from a 5×5 grid with only the FREE cell marked.
//! - Mutated only by `mark_number` and `detect_new_lines`.
//! - Marks and completed lines only ever grow.
//!
//! ## Edge-Triggered Detection
//!
//! `detect_new_lines` returns each line exactly once: on the first check
//! after its last cell is marked. A line stays complete afterwards but is
//! never reported again.
//!
//! ```
//! use bingo_tracker::cards::{Card, Grid, Line};
//!
//! let mut card = Card::new("5890", Grid::new([
//!     [13, 22, 42, 49, 61],
//!     [6, 21, 38, 57, 64],
//!     [2, 16, 0, 55, 66],
//!     [11, 23, 35, 58, 65],
//!     [5, 29, 45, 53, 70],
//! ]));
//!
//! for n in [13, 22, 42, 49, 61] {
//!     card.mark_number(n);
//! }
//! assert!(card.detect_new_lines().contains(Line::row(0)));
//! assert!(card.detect_new_lines().is_empty());
//! ```

use serde::{Deserialize, Serialize};

use super::grid::{is_free, Grid, FREE_CELL, SIZE};
use super::line::{Line, LineSet};
use crate::core::CardId;
use crate::error::{BingoError, Result};

/// Mark state for every cell.
pub type Marks = [[bool; SIZE]; SIZE];

/// Whether a card has won yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardStatus {
    /// No line completed yet.
    Active,
    /// At least one line completed. Marking continues.
    Won,
}

/// A tracked card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    grid: Grid,
    marked: Marks,
    completed: LineSet,
}

/// Serializable card state.
///
/// `Card::restore(card.snapshot())` reproduces the card exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub id: CardId,
    pub grid: Grid,
    pub marked: Marks,
    pub completed: LineSet,
}

impl Card {
    /// Create a card with only the FREE cell marked.
    #[must_use]
    pub fn new(id: impl Into<CardId>, grid: Grid) -> Self {
        let mut marked = [[false; SIZE]; SIZE];
        marked[FREE_CELL.0][FREE_CELL.1] = true;

        Self {
            id: id.into(),
            grid,
            marked,
            completed: LineSet::new(),
        }
    }

    /// Create a card from nested rows.
    ///
    /// Fails with `InvalidGridShape` unless the rows form a 5×5 grid.
    pub fn from_rows(id: impl Into<CardId>, rows: Vec<Vec<u8>>) -> Result<Self> {
        Ok(Self::new(id, Grid::from_rows(rows)?))
    }

    /// Rebuild a card from a snapshot.
    ///
    /// Fails with `CorruptSnapshot` if the FREE cell is unmarked or a
    /// completed line is not fully marked.
    pub fn restore(snapshot: CardSnapshot) -> Result<Self> {
        let CardSnapshot {
            id,
            grid,
            marked,
            completed,
        } = snapshot;

        if !marked[FREE_CELL.0][FREE_CELL.1] {
            return Err(BingoError::corrupt(format!(
                "card {id}: FREE cell is not marked"
            )));
        }

        let card = Self {
            id,
            grid,
            marked,
            completed,
        };

        if let Some(line) = completed.iter().find(|&line| !card.is_line_complete(line)) {
            return Err(BingoError::corrupt(format!(
                "card {}: {line} is recorded complete but not fully marked",
                card.id
            )));
        }

        Ok(card)
    }

    /// Capture the card's full state.
    #[must_use]
    pub fn snapshot(&self) -> CardSnapshot {
        CardSnapshot {
            id: self.id.clone(),
            grid: self.grid,
            marked: self.marked,
            completed: self.completed,
        }
    }

    /// Mark every cell holding `n`.
    ///
    /// Returns true if `n` is on the card, whether or not its cells were
    /// already marked. The FREE cell is never matched.
    pub fn mark_number(&mut self, n: u8) -> bool {
        let mut found = false;
        for row in 0..SIZE {
            for col in 0..SIZE {
                if !is_free(row, col) && self.grid.get(row, col) == n {
                    self.marked[row][col] = true;
                    found = true;
                }
            }
        }
        found
    }

    /// Record and return lines that became complete since the last check.
    pub fn detect_new_lines(&mut self) -> LineSet {
        let mut fresh = LineSet::new();
        for line in Line::ALL {
            if !self.completed.contains(line) && self.is_line_complete(line) {
                self.completed.insert(line);
                fresh.insert(line);
            }
        }
        fresh
    }

    // === Queries ===

    /// Card identifier.
    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.id
    }

    /// Card numbers.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Full mark state.
    #[must_use]
    pub fn marks(&self) -> &Marks {
        &self.marked
    }

    /// Check if a cell is marked.
    #[must_use]
    pub fn is_marked(&self, row: usize, col: usize) -> bool {
        self.marked[row][col]
    }

    /// Number of marked cells, FREE included.
    #[must_use]
    pub fn marked_count(&self) -> usize {
        self.marked.iter().flatten().filter(|&&m| m).count()
    }

    /// Lines already reported complete.
    #[must_use]
    pub fn completed_lines(&self) -> LineSet {
        self.completed
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> CardStatus {
        if self.completed.is_empty() {
            CardStatus::Active
        } else {
            CardStatus::Won
        }
    }

    /// Check if every cell on `line` is marked.
    #[must_use]
    pub fn is_line_complete(&self, line: Line) -> bool {
        self.line_progress(line) == SIZE
    }

    /// Number of marked cells on `line`.
    #[must_use]
    pub fn line_progress(&self, line: Line) -> usize {
        line.cells()
            .iter()
            .filter(|&&(r, c)| self.marked[r][c])
            .count()
    }

    /// Lines missing exactly one mark.
    #[must_use]
    pub fn lines_one_away(&self) -> LineSet {
        Line::ALL
            .into_iter()
            .filter(|&line| self.line_progress(line) == SIZE - 1)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_5890() -> Card {
        Card::new(
            5890u64,
            Grid::new([
                [13, 22, 42, 49, 61],
                [6, 21, 38, 57, 64],
                [2, 16, 0, 55, 66],
                [11, 23, 35, 58, 65],
                [5, 29, 45, 53, 70],
            ]),
        )
    }

    fn mark_all(card: &mut Card, numbers: &[u8]) {
        for &n in numbers {
            card.mark_number(n);
        }
    }

    #[test]
    fn test_new_card_has_free_marked() {
        let card = card_5890();
        assert!(card.is_marked(2, 2));
        assert_eq!(card.marked_count(), 1);
        assert_eq!(card.status(), CardStatus::Active);
        assert!(card.completed_lines().is_empty());
    }

    #[test]
    fn test_from_rows_rejects_bad_shape() {
        let rows = vec![vec![1, 2, 3, 4, 5]; 3];
        assert_eq!(
            Card::from_rows("x", rows),
            Err(BingoError::InvalidGridShape { rows: 3, cols: 5 })
        );
    }

    #[test]
    fn test_mark_number_existence_based() {
        let mut card = card_5890();
        assert!(card.mark_number(38));
        assert!(card.is_marked(1, 2));
        assert!(card.mark_number(38));
        assert!(!card.mark_number(1));
    }

    #[test]
    fn test_mark_zero_never_matches_free() {
        let mut card = card_5890();
        assert!(!card.mark_number(0));
        assert_eq!(card.marked_count(), 1);
    }

    #[test]
    fn test_mark_number_marks_all_occurrences() {
        let mut cells = *card_5890().grid().rows();
        cells[4][4] = 13;
        let mut card = Card::new("dup", Grid::new(cells));

        assert!(card.mark_number(13));
        assert!(card.is_marked(0, 0));
        assert!(card.is_marked(4, 4));
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut card = card_5890();
        card.mark_number(21);
        let before = *card.marks();
        card.mark_number(21);
        assert_eq!(*card.marks(), before);
    }

    #[test]
    fn test_row_detected_once() {
        let mut card = card_5890();
        mark_all(&mut card, &[61, 49, 42, 22]);
        assert!(card.detect_new_lines().is_empty());

        card.mark_number(13);
        let lines: Vec<Line> = card.detect_new_lines().iter().collect();
        assert_eq!(lines, vec![Line::row(0)]);
        assert_eq!(card.status(), CardStatus::Won);

        card.mark_number(6);
        assert!(card.detect_new_lines().is_empty());
    }

    #[test]
    fn test_middle_row_uses_free() {
        let mut card = card_5890();
        mark_all(&mut card, &[2, 16, 55, 66]);
        let lines: Vec<Line> = card.detect_new_lines().iter().collect();
        assert_eq!(lines, vec![Line::row(2)]);
    }

    #[test]
    fn test_column_detected() {
        let mut card = card_5890();
        mark_all(&mut card, &[13, 6, 2, 11, 5]);
        assert!(card.detect_new_lines().contains(Line::column(0)));
    }

    #[test]
    fn test_diagonals_detected() {
        let mut card = card_5890();
        mark_all(&mut card, &[13, 21, 58]);
        assert!(card.detect_new_lines().is_empty());
        card.mark_number(70);
        let lines: Vec<Line> = card.detect_new_lines().iter().collect();
        assert_eq!(lines, vec![Line::MAIN_DIAGONAL]);

        mark_all(&mut card, &[61, 57, 23, 5]);
        let lines: Vec<Line> = card.detect_new_lines().iter().collect();
        assert_eq!(lines, vec![Line::ANTI_DIAGONAL]);
    }

    #[test]
    fn test_one_call_can_complete_several_lines() {
        let mut card = card_5890();
        // Everything in row 0 and column 0 except the shared corner
        mark_all(&mut card, &[22, 42, 49, 61, 6, 2, 11, 5]);
        assert!(card.detect_new_lines().is_empty());

        card.mark_number(13);
        let lines: Vec<Line> = card.detect_new_lines().iter().collect();
        assert_eq!(lines, vec![Line::row(0), Line::column(0)]);
    }

    #[test]
    fn test_lines_one_away() {
        let mut card = card_5890();
        mark_all(&mut card, &[2, 16, 55]);
        let reach: Vec<Line> = card.lines_one_away().iter().collect();
        assert_eq!(reach, vec![Line::row(2)]);
        assert_eq!(card.line_progress(Line::row(2)), 4);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut card = card_5890();
        mark_all(&mut card, &[13, 22, 42, 49, 61, 35]);
        card.detect_new_lines();

        let restored = Card::restore(card.snapshot()).unwrap();
        assert_eq!(restored, card);
    }

    #[test]
    fn test_restore_rejects_unmarked_free() {
        let mut snapshot = card_5890().snapshot();
        snapshot.marked[2][2] = false;
        assert!(matches!(
            Card::restore(snapshot),
            Err(BingoError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn test_restore_rejects_incomplete_recorded_line() {
        let mut snapshot = card_5890().snapshot();
        snapshot.completed.insert(Line::column(2));
        let err = Card::restore(snapshot).unwrap_err();
        assert_eq!(
            err,
            BingoError::CorruptSnapshot(
                "card 5890: col_2 is recorded complete but not fully marked".to_string()
            )
        );
    }

    #[test]
    fn test_restored_card_keeps_edge_trigger_state() {
        let mut card = card_5890();
        mark_all(&mut card, &[13, 6, 2, 11, 5]);
        card.detect_new_lines();

        let mut restored = Card::restore(card.snapshot()).unwrap();
        restored.mark_number(13);
        assert!(restored.detect_new_lines().is_empty());
    }
}
