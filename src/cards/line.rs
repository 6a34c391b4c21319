//! Winning lines and sets of lines.
//!
//! A card has 12 lines: 5 rows, 5 columns, and 2 diagonals. `Line::ALL`
//! lists them in check order (rows, columns, main diagonal, anti-diagonal),
//! which is also the iteration order of `LineSet`.
//!
//! ## Persisted Names
//!
//! | Line            | Name        | Also accepted |
//! |-----------------|-------------|---------------|
//! | row `i`         | `row_<i>`   |               |
//! | column `j`      | `col_<j>`   |               |
//! | main diagonal   | `diagonal1` | `diag_main`   |
//! | anti-diagonal   | `diagonal2` | `diag_anti`   |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::grid::SIZE;

const LINE_COUNT: usize = 2 * SIZE + 2;
const MAIN: u8 = 2 * SIZE as u8;
const ANTI: u8 = MAIN + 1;

/// One of the 12 winning lines on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Line(u8);

/// Shape of a line, for matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Row(usize),
    Column(usize),
    MainDiagonal,
    AntiDiagonal,
}

impl Line {
    /// Top-left to bottom-right.
    pub const MAIN_DIAGONAL: Line = Line(MAIN);

    /// Top-right to bottom-left.
    pub const ANTI_DIAGONAL: Line = Line(ANTI);

    /// All lines in check order.
    #[rustfmt::skip]
    pub const ALL: [Line; LINE_COUNT] = [
        Line(0), Line(1), Line(2), Line(3), Line(4),
        Line(5), Line(6), Line(7), Line(8), Line(9),
        Line(MAIN), Line(ANTI),
    ];

    /// Row `i` (0-based). Panics if `i >= 5`.
    #[must_use]
    pub const fn row(i: usize) -> Self {
        assert!(i < SIZE, "row index out of range");
        Self(i as u8)
    }

    /// Column `j` (0-based). Panics if `j >= 5`.
    #[must_use]
    pub const fn column(j: usize) -> Self {
        assert!(j < SIZE, "column index out of range");
        Self((SIZE + j) as u8)
    }

    /// Which line this is.
    #[must_use]
    pub const fn kind(self) -> LineKind {
        match self.0 {
            MAIN => LineKind::MainDiagonal,
            ANTI => LineKind::AntiDiagonal,
            i if (i as usize) < SIZE => LineKind::Row(i as usize),
            j => LineKind::Column(j as usize - SIZE),
        }
    }

    /// The five `(row, col)` positions on this line.
    #[must_use]
    pub fn cells(self) -> [(usize, usize); SIZE] {
        std::array::from_fn(|k| match self.kind() {
            LineKind::Row(r) => (r, k),
            LineKind::Column(c) => (k, c),
            LineKind::MainDiagonal => (k, k),
            LineKind::AntiDiagonal => (k, SIZE - 1 - k),
        })
    }

    /// Human-readable label for announcements.
    #[must_use]
    pub fn label(self) -> String {
        match self.kind() {
            LineKind::Row(r) => format!("Row {}", r + 1),
            LineKind::Column(c) => format!("Column {}", c + 1),
            LineKind::MainDiagonal => "Diagonal (top-left to bottom-right)".to_string(),
            LineKind::AntiDiagonal => "Diagonal (top-right to bottom-left)".to_string(),
        }
    }

    const fn bit(self) -> u16 {
        1 << self.0
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            LineKind::Row(r) => write!(f, "row_{r}"),
            LineKind::Column(c) => write!(f, "col_{c}"),
            LineKind::MainDiagonal => f.write_str("diagonal1"),
            LineKind::AntiDiagonal => f.write_str("diagonal2"),
        }
    }
}

impl FromStr for Line {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "diagonal1" | "diag_main" => return Ok(Self::MAIN_DIAGONAL),
            "diagonal2" | "diag_anti" => return Ok(Self::ANTI_DIAGONAL),
            _ => {}
        }

        let indexed = |prefix: &str| -> Option<usize> {
            let digits = s.strip_prefix(prefix)?;
            let i: usize = digits.parse().ok()?;
            (i < SIZE && digits.len() == 1).then_some(i)
        };

        if let Some(i) = indexed("row_") {
            Ok(Self::row(i))
        } else if let Some(j) = indexed("col_") {
            Ok(Self::column(j))
        } else {
            Err(format!("unknown line {s:?}"))
        }
    }
}

impl From<Line> for String {
    fn from(line: Line) -> Self {
        line.to_string()
    }
}

impl TryFrom<String> for Line {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A set of lines, iterated in check order.
///
/// ```
/// use bingo_tracker::cards::{Line, LineSet};
///
/// let mut set = LineSet::new();
/// assert!(set.insert(Line::ANTI_DIAGONAL));
/// assert!(set.insert(Line::row(3)));
/// assert!(!set.insert(Line::row(3)));
///
/// let names: Vec<String> = set.iter().map(|l| l.to_string()).collect();
/// assert_eq!(names, ["row_3", "diagonal2"]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Line>", from = "Vec<Line>")]
pub struct LineSet(u16);

impl LineSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a line. Returns true if it was not already present.
    pub fn insert(&mut self, line: Line) -> bool {
        let fresh = !self.contains(line);
        self.0 |= line.bit();
        fresh
    }

    /// Check membership.
    #[must_use]
    pub const fn contains(&self, line: Line) -> bool {
        self.0 & line.bit() != 0
    }

    /// Number of lines in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Check if the set is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Lines in `self` but not in `other`.
    #[must_use]
    pub const fn difference(&self, other: &LineSet) -> LineSet {
        LineSet(self.0 & !other.0)
    }

    /// Check whether every line in `self` is also in `other`.
    #[must_use]
    pub const fn is_subset(&self, other: &LineSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Iterate in check order.
    pub fn iter(&self) -> impl Iterator<Item = Line> + '_ {
        Line::ALL.into_iter().filter(move |&line| self.contains(line))
    }
}

impl FromIterator<Line> for LineSet {
    fn from_iter<I: IntoIterator<Item = Line>>(iter: I) -> Self {
        let mut set = LineSet::new();
        for line in iter {
            set.insert(line);
        }
        set
    }
}

impl From<Vec<Line>> for LineSet {
    fn from(lines: Vec<Line>) -> Self {
        lines.into_iter().collect()
    }
}

impl From<LineSet> for Vec<Line> {
    fn from(set: LineSet) -> Self {
        set.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_lines_distinct() {
        let set: LineSet = Line::ALL.into_iter().collect();
        assert_eq!(set.len(), 12);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Line::row(4).kind(), LineKind::Row(4));
        assert_eq!(Line::column(0).kind(), LineKind::Column(0));
        assert_eq!(Line::column(4).kind(), LineKind::Column(4));
        assert_eq!(Line::MAIN_DIAGONAL.kind(), LineKind::MainDiagonal);
        assert_eq!(Line::ANTI_DIAGONAL.kind(), LineKind::AntiDiagonal);
    }

    #[test]
    #[should_panic(expected = "row index out of range")]
    fn test_row_out_of_range_panics() {
        let _ = Line::row(5);
    }

    #[test]
    fn test_cells() {
        assert_eq!(Line::row(1).cells(), [(1, 0), (1, 1), (1, 2), (1, 3), (1, 4)]);
        assert_eq!(Line::column(3).cells(), [(0, 3), (1, 3), (2, 3), (3, 3), (4, 3)]);
        assert_eq!(
            Line::MAIN_DIAGONAL.cells(),
            [(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]
        );
        assert_eq!(
            Line::ANTI_DIAGONAL.cells(),
            [(0, 4), (1, 3), (2, 2), (3, 1), (4, 0)]
        );
    }

    #[test]
    fn test_names_round_trip() {
        for line in Line::ALL {
            let name = line.to_string();
            assert_eq!(name.parse::<Line>(), Ok(line));
        }
        assert_eq!(Line::row(0).to_string(), "row_0");
        assert_eq!(Line::column(2).to_string(), "col_2");
        assert_eq!(Line::MAIN_DIAGONAL.to_string(), "diagonal1");
    }

    #[test]
    fn test_parse_aliases_and_rejects() {
        assert_eq!("diag_main".parse::<Line>(), Ok(Line::MAIN_DIAGONAL));
        assert_eq!("diag_anti".parse::<Line>(), Ok(Line::ANTI_DIAGONAL));
        assert!("row_5".parse::<Line>().is_err());
        assert!("row_01".parse::<Line>().is_err());
        assert!("col_".parse::<Line>().is_err());
        assert!("diagonal3".parse::<Line>().is_err());
        assert!("横1行目".parse::<Line>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Line::row(0).label(), "Row 1");
        assert_eq!(Line::column(4).label(), "Column 5");
        assert_eq!(Line::ANTI_DIAGONAL.label(), "Diagonal (top-right to bottom-left)");
    }

    #[test]
    fn test_set_operations() {
        let a: LineSet = [Line::row(0), Line::column(1), Line::MAIN_DIAGONAL]
            .into_iter()
            .collect();
        let b: LineSet = [Line::row(0)].into_iter().collect();

        assert!(b.is_subset(&a));
        assert!(!a.is_subset(&b));
        let diff: Vec<Line> = a.difference(&b).into();
        assert_eq!(diff, vec![Line::column(1), Line::MAIN_DIAGONAL]);
    }

    #[test]
    fn test_set_iterates_in_check_order() {
        let set: LineSet = [Line::ANTI_DIAGONAL, Line::column(0), Line::row(4)]
            .into_iter()
            .collect();
        let order: Vec<Line> = set.iter().collect();
        assert_eq!(order, vec![Line::row(4), Line::column(0), Line::ANTI_DIAGONAL]);
    }

    #[test]
    fn test_set_serialization() {
        let set: LineSet = [Line::column(3), Line::row(1)].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["row_1","col_3"]"#);

        let back: LineSet = serde_json::from_str(r#"["col_3","row_1","row_1"]"#).unwrap();
        assert_eq!(back, set);

        assert!(serde_json::from_str::<LineSet>(r#"["row_9"]"#).is_err());
    }
}
