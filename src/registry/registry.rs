//! The card registry: registered cards, called numbers, persistence.
//!
//! ## Event Interface
//!
//! - `register_card` / `register_rows`: add a card, catching up on numbers
//!   already called (persists)
//! - `remove_card`: drop a card (persists)
//! - `call_number`: mark and detect on every card (persists)
//!
//! ## Failure Semantics
//!
//! A rejected operation returns a `BingoError` and changes nothing.
//! A failed save does not fail the operation: it is logged and kept in
//! `last_persist_error` for the caller to inspect.

use im::Vector;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::call::{BingoRecord, CallResult, CardCallResult};
use super::caller::NumberCaller;
use crate::cards::{Card, CardStatus, Grid, Line, LineSet};
use crate::core::number::is_callable;
use crate::core::CardId;
use crate::error::{BingoError, Result, StoreError};
use crate::store::{MemoryStore, Snapshot, SnapshotStore};

/// Registered cards plus the numbers called in the current game.
///
/// ## Example
///
/// ```
/// use bingo_tracker::cards::{Grid, Line};
/// use bingo_tracker::registry::Registry;
///
/// let mut registry = Registry::new();
/// registry.register_card("5890", Grid::new([
///     [13, 22, 42, 49, 61],
///     [6, 21, 38, 57, 64],
///     [2, 16, 0, 55, 66],
///     [11, 23, 35, 58, 65],
///     [5, 29, 45, 53, 70],
/// ])).unwrap();
///
/// for n in [13, 6, 2, 11] {
///     registry.call_number(n).unwrap();
/// }
/// let result = registry.call_number(5).unwrap();
/// let bingos: Vec<_> = result.new_bingos().map(|(_, line)| line).collect();
/// assert_eq!(bingos, vec![Line::column(0)]);
///
/// assert!(registry.call_number(5).is_err()); // already called
/// ```
#[derive(Debug)]
pub struct Registry<S: SnapshotStore = MemoryStore> {
    /// Cards in registration order.
    cards: Vec<Card>,

    /// Numbers called this game. Not persisted.
    called: FxHashSet<u8>,

    /// Called numbers in call order.
    call_log: Vector<u8>,

    /// Completed lines in the order they happened.
    history: Vector<BingoRecord>,

    /// Apply `Grid::check_numbers` on registration.
    strict_numbers: bool,

    store: S,
    last_persist_error: Option<StoreError>,
}

impl Registry<MemoryStore> {
    /// Create an empty registry backed by an in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Rebuild a registry from a snapshot, backed by an in-memory store.
    ///
    /// Called numbers start empty.
    pub fn load_snapshot(snapshot: Snapshot) -> Result<Self> {
        let cards = restore_cards(snapshot.clone())?;
        let mut registry = Self::with_store(MemoryStore::with_snapshot(snapshot));
        registry.cards = cards;
        Ok(registry)
    }
}

impl Default for Registry<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SnapshotStore> Registry<S> {
    /// Create an empty registry on top of a store, ignoring what it holds.
    #[must_use]
    pub fn with_store(store: S) -> Self {
        Self {
            cards: Vec::new(),
            called: FxHashSet::default(),
            call_log: Vector::new(),
            history: Vector::new(),
            strict_numbers: false,
            store,
            last_persist_error: None,
        }
    }

    /// Open a registry from whatever the store holds.
    ///
    /// An empty store gives an empty registry. Corrupt data fails closed.
    pub fn open(store: S) -> std::result::Result<Self, StoreError> {
        let snapshot = store.load()?;
        let mut registry = Self::with_store(store);
        if let Some(snapshot) = snapshot {
            registry.cards = restore_cards(snapshot)?;
        }
        info!(cards = registry.cards.len(), "Opened registry");
        Ok(registry)
    }

    /// Reject registrations whose grids fail `Grid::check_numbers`.
    #[must_use]
    pub fn with_strict_numbers(mut self, strict: bool) -> Self {
        self.strict_numbers = strict;
        self
    }

    // === Events ===

    /// Register a card.
    ///
    /// Numbers already called this game are marked on the new card, and
    /// any lines they complete go into the bingo history.
    ///
    /// Fails with `DuplicateCardId` if the id is taken, or with the
    /// number-policy errors when strict numbers are enabled.
    pub fn register_card(&mut self, id: impl Into<CardId>, grid: Grid) -> Result<&Card> {
        let id = id.into();
        if self.contains(&id) {
            return Err(BingoError::DuplicateCardId(id));
        }
        if self.strict_numbers {
            grid.check_numbers()?;
        }

        let mut card = Card::new(id, grid);
        for &n in &self.call_log {
            card.mark_number(n);
        }
        let caught_up = card.detect_new_lines();

        info!(card_id = %card.id(), catch_up = self.call_log.len(), "Registered card");
        for line in caught_up.iter() {
            // Credit the line to the latest call that landed on it
            let number = self
                .call_log
                .iter()
                .rev()
                .copied()
                .find(|&n| card.grid().positions_of(n).any(|pos| line.cells().contains(&pos)));
            if let Some(number) = number {
                record_bingo(&mut self.history, card.id(), line, number);
            }
        }

        self.cards.push(card);
        self.persist();

        let index = self.cards.len() - 1;
        Ok(&self.cards[index])
    }

    /// Register a card from nested rows.
    ///
    /// Like `register_card`, and also fails with `InvalidGridShape`.
    pub fn register_rows(&mut self, id: impl Into<CardId>, rows: Vec<Vec<u8>>) -> Result<&Card> {
        let id = id.into();
        if self.contains(&id) {
            return Err(BingoError::DuplicateCardId(id));
        }
        let grid = Grid::from_rows(rows)?;
        self.register_card(id, grid)
    }

    /// Remove a card, returning it.
    pub fn remove_card(&mut self, id: &CardId) -> Result<Card> {
        let index = self
            .position(id)
            .ok_or_else(|| BingoError::CardNotFound(id.clone()))?;

        let card = self.cards.remove(index);
        info!(card_id = %id, "Removed card");
        self.persist();
        Ok(card)
    }

    /// Call a number against every card.
    ///
    /// Fails with `OutOfRange` outside 1-75 and with `AlreadyCalled` on a
    /// repeat. Always persists after a successful call.
    pub fn call_number(&mut self, n: u8) -> Result<CallResult> {
        if !is_callable(n) {
            return Err(BingoError::OutOfRange(n));
        }
        if !self.called.insert(n) {
            return Err(BingoError::AlreadyCalled(n));
        }
        self.call_log.push_back(n);

        let mut cards = SmallVec::with_capacity(self.cards.len());
        for card in &mut self.cards {
            let was_marked = card.mark_number(n);
            let new_lines = card.detect_new_lines();

            for line in new_lines.iter() {
                record_bingo(&mut self.history, card.id(), line, n);
            }

            cards.push(CardCallResult {
                card_id: card.id().clone(),
                was_marked,
                new_lines,
            });
        }

        let result = CallResult { number: n, cards };
        debug!(
            number = n,
            marked = result.marked_cards().count(),
            bingo = result.has_bingo(),
            "Called number"
        );

        self.persist();
        Ok(result)
    }

    /// Draw from `caller` until an uncalled number comes up, then call it.
    ///
    /// Numbers called by hand are skipped. Returns `Ok(None)` once the
    /// caller is exhausted, and any other rejection as an error.
    pub fn call_next(&mut self, caller: &mut NumberCaller) -> Result<Option<CallResult>> {
        while let Some(n) = caller.draw() {
            match self.call_number(n) {
                Ok(result) => return Ok(Some(result)),
                Err(BingoError::AlreadyCalled(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    /// Start a new game with the same cards.
    ///
    /// Forgets called numbers and bingo history, and replaces every card
    /// with a fresh one holding the same id and grid.
    pub fn new_game(&mut self) {
        self.called.clear();
        self.call_log.clear();
        self.history.clear();
        for card in &mut self.cards {
            *card = Card::new(card.id().clone(), *card.grid());
        }
        info!(cards = self.cards.len(), "Started new game");
        self.persist();
    }

    // === Queries ===

    /// Cards in registration order.
    #[must_use]
    pub fn list_cards(&self) -> &[Card] {
        &self.cards
    }

    /// Look up a card.
    #[must_use]
    pub fn get_card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == id)
    }

    /// Check if a card id is registered.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.position(id).is_some()
    }

    /// Lines a card has completed so far.
    pub fn completed_lines_for(&self, id: &CardId) -> Result<LineSet> {
        self.get_card(id)
            .map(Card::completed_lines)
            .ok_or_else(|| BingoError::CardNotFound(id.clone()))
    }

    /// Cards with at least one completed line.
    pub fn winners(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| card.status() == CardStatus::Won)
    }

    /// Number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if no cards are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check if `n` was called this game.
    #[must_use]
    pub fn is_called(&self, n: u8) -> bool {
        self.called.contains(&n)
    }

    /// Called numbers in call order.
    #[must_use]
    pub fn call_log(&self) -> &Vector<u8> {
        &self.call_log
    }

    /// Called numbers, ascending.
    #[must_use]
    pub fn called_numbers_sorted(&self) -> Vec<u8> {
        let mut numbers: Vec<u8> = self.called.iter().copied().collect();
        numbers.sort_unstable();
        numbers
    }

    /// Completed lines this game, in order.
    #[must_use]
    pub fn bingo_history(&self) -> &Vector<BingoRecord> {
        &self.history
    }

    /// Completed lines this game, across all cards.
    #[must_use]
    pub fn bingo_count(&self) -> usize {
        self.history.len()
    }

    /// Snapshot of every card, in registration order.
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot::new(self.cards.iter().map(Card::snapshot).collect())
    }

    /// The persistence backend.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Error from the most recent save, cleared by the next successful one.
    #[must_use]
    pub fn last_persist_error(&self) -> Option<&StoreError> {
        self.last_persist_error.as_ref()
    }

    /// Write the current snapshot to the store now.
    ///
    /// Updates `last_persist_error` like any automatic save and returns
    /// the failure, if any.
    pub fn flush(&mut self) -> std::result::Result<(), &StoreError> {
        self.persist();
        self.last_persist_error.as_ref().map_or(Ok(()), Err)
    }

    // === Internals ===

    fn position(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id() == id)
    }

    fn persist(&mut self) {
        let snapshot = self.to_snapshot();
        match self.store.save(&snapshot) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                warn!(error = %e, "Failed to persist snapshot");
                self.last_persist_error = Some(e);
            }
        }
    }
}

fn record_bingo(history: &mut Vector<BingoRecord>, card_id: &CardId, line: Line, number: u8) {
    let total = history.len() + 1;
    info!(card_id = %card_id, line = %line, number, total, "Bingo");
    history.push_back(BingoRecord {
        card_id: card_id.clone(),
        line,
        number,
        total,
    });
}

fn restore_cards(snapshot: Snapshot) -> Result<Vec<Card>> {
    let mut seen = FxHashSet::default();
    let mut cards = Vec::with_capacity(snapshot.len());

    for data in snapshot.cards {
        if !seen.insert(data.id.clone()) {
            return Err(BingoError::corrupt(format!("duplicate card {}", data.id)));
        }
        cards.push(Card::restore(data)?);
    }

    Ok(cards)
}
