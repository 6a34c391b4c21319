//! Results of calling a number, and the running bingo history.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Line, LineSet};
use crate::core::CardId;

/// Effect of one called number on one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCallResult {
    /// Card the result belongs to.
    pub card_id: CardId,

    /// True if the number is on the card.
    pub was_marked: bool,

    /// Lines completed by this call. Empty for most calls.
    pub new_lines: LineSet,
}

/// Effect of one called number on every card, in registration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallResult {
    /// The number that was called.
    pub number: u8,

    /// One entry per registered card.
    pub cards: SmallVec<[CardCallResult; 4]>,
}

impl CallResult {
    /// Result for a specific card.
    #[must_use]
    pub fn get(&self, card_id: &CardId) -> Option<&CardCallResult> {
        self.cards.iter().find(|r| &r.card_id == card_id)
    }

    /// Cards that hold the called number.
    pub fn marked_cards(&self) -> impl Iterator<Item = &CardId> {
        self.cards.iter().filter(|r| r.was_marked).map(|r| &r.card_id)
    }

    /// Every `(card, line)` completed by this call.
    pub fn new_bingos(&self) -> impl Iterator<Item = (&CardId, Line)> {
        self.cards
            .iter()
            .flat_map(|r| r.new_lines.iter().map(move |line| (&r.card_id, line)))
    }

    /// Check if any card completed a line on this call.
    #[must_use]
    pub fn has_bingo(&self) -> bool {
        self.cards.iter().any(|r| !r.new_lines.is_empty())
    }

    /// Check if the call marked or completed anything.
    #[must_use]
    pub fn changed_any(&self) -> bool {
        self.cards.iter().any(|r| r.was_marked || !r.new_lines.is_empty())
    }
}

/// One completed line, in the order bingos happened during a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BingoRecord {
    /// Card that completed the line.
    pub card_id: CardId,

    /// The completed line.
    pub line: Line,

    /// Number whose call completed it.
    pub number: u8,

    /// Bingos in this game so far, this one included.
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn result() -> CallResult {
        CallResult {
            number: 13,
            cards: smallvec![
                CardCallResult {
                    card_id: CardId::new("5890"),
                    was_marked: true,
                    new_lines: [Line::row(0), Line::column(0)].into_iter().collect(),
                },
                CardCallResult {
                    card_id: CardId::new("4119"),
                    was_marked: false,
                    new_lines: LineSet::new(),
                },
            ],
        }
    }

    #[test]
    fn test_queries() {
        let result = result();
        assert!(result.has_bingo());
        assert!(result.changed_any());

        let marked: Vec<_> = result.marked_cards().collect();
        assert_eq!(marked, vec![&CardId::new("5890")]);

        let bingos: Vec<_> = result.new_bingos().collect();
        assert_eq!(
            bingos,
            vec![
                (&CardId::new("5890"), Line::row(0)),
                (&CardId::new("5890"), Line::column(0)),
            ]
        );

        assert!(!result.get(&CardId::new("4119")).unwrap().was_marked);
        assert!(result.get(&CardId::new("1")).is_none());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(result()).unwrap();
        assert_eq!(json["number"], 13);
        assert_eq!(json["cards"][0]["new_lines"], serde_json::json!(["row_0", "col_0"]));
    }
}
