//! Card system: grids, lines, and tracked cards.
//!
//! ## Key Types
//!
//! - `Grid`: Validated 5×5 numbers with a FREE center
//! - `Line`: One of 12 winning lines (rows, columns, diagonals)
//! - `LineSet`: Compact set of lines in check order
//! - `Card`: Grid plus mark state and completed-line history
//! - `CardSnapshot`: Serializable card state

pub mod card;
pub mod grid;
pub mod line;

pub use card::{Card, CardSnapshot, CardStatus, Marks};
pub use grid::{is_free, Grid, FREE_CELL, FREE_VALUE, SIZE};
pub use line::{Line, LineKind, LineSet};
