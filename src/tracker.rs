//! Hidden-information bookkeeping for the 52-card universe.
//!
//! Every card lives in exactly one slot of a fixed table, so the
//! unseen / in-reserve / in-play classification cannot drift out of sync.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::card::{Card, DECK_SIZE, RESERVE_SIZE};
use crate::error::AdvisorError;
use crate::state::{DrawMode, Snapshot};

/// What the advisor knows about one card.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Knowledge {
    /// Never observed.
    Unseen,
    /// Observed in the reserve; the sequence number orders arrivals.
    InReserve(u8),
    /// Observed face-up on the tableau or atop a foundation.
    InPlay,
}

/// Partial-information tracker rebuilt for every deal.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnowledgeTracker {
    mode: DrawMode,
    table: Vec<Knowledge>,
    seen_reserve: usize,
    next_sequence: u8,
}

impl KnowledgeTracker {
    pub fn new(mode: DrawMode) -> Self {
        Self {
            mode,
            table: vec![Knowledge::Unseen; DECK_SIZE],
            seen_reserve: 0,
            next_sequence: 0,
        }
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn knowledge(&self, card: Card) -> Knowledge {
        self.table[card.index()]
    }

    pub fn is_unseen(&self, card: Card) -> bool {
        self.knowledge(card) == Knowledge::Unseen
    }

    pub fn is_in_reserve(&self, card: Card) -> bool {
        matches!(self.knowledge(card), Knowledge::InReserve(_))
    }

    pub fn is_in_play(&self, card: Card) -> bool {
        self.knowledge(card) == Knowledge::InPlay
    }

    /// Number of distinct reserve cards identified so far, saturating at 24.
    pub fn seen_reserve_count(&self) -> usize {
        self.seen_reserve
    }

    /// Every reserve card has been identified.
    pub fn reserve_known(&self) -> bool {
        self.seen_reserve >= RESERVE_SIZE
    }

    pub fn missing(&self) -> Vec<Card> {
        self.cards_where(|k| k == Knowledge::Unseen)
    }

    pub fn in_play(&self) -> Vec<Card> {
        self.cards_where(|k| k == Knowledge::InPlay)
    }

    /// Cards known to sit in the reserve, oldest sighting first.
    pub fn in_reserve(&self) -> Vec<Card> {
        let mut cards: Vec<(u8, Card)> = self
            .table
            .iter()
            .enumerate()
            .filter_map(|(idx, knowledge)| match knowledge {
                Knowledge::InReserve(seq) => Card::from_index(idx).map(|card| (*seq, card)),
                _ => None,
            })
            .collect();
        cards.sort_unstable_by_key(|(seq, _)| *seq);
        cards.into_iter().map(|(_, card)| card).collect()
    }

    fn cards_where(&self, predicate: impl Fn(Knowledge) -> bool) -> Vec<Card> {
        self.table
            .iter()
            .enumerate()
            .filter(|(_, knowledge)| predicate(**knowledge))
            .filter_map(|(idx, _)| Card::from_index(idx))
            .collect()
    }

    /// Reconciles the table with a fresh observation.
    ///
    /// Returns the number of cards whose classification changed.
    pub fn update(&mut self, snapshot: &Snapshot) -> usize {
        let mut changed = 0;

        let revealed = match self.mode {
            DrawMode::Single => &snapshot.reserve[..1],
            DrawMode::Triple => &snapshot.reserve[..],
        };
        // Oldest exposure first so arrival order matches the pile.
        for card in revealed.iter().rev().flatten() {
            if self.seen_reserve >= RESERVE_SIZE {
                break;
            }
            if self.is_unseen(*card) {
                self.table[card.index()] = Knowledge::InReserve(self.next_sequence);
                self.next_sequence = self.next_sequence.saturating_add(1);
                self.seen_reserve += 1;
                changed += 1;
                trace!(%card, seen = self.seen_reserve, "reserve card identified");
            }
        }

        for card in snapshot.visible_cards() {
            if !self.is_in_play(card) {
                trace!(%card, from = ?self.knowledge(card), "card confirmed in play");
                self.table[card.index()] = Knowledge::InPlay;
                changed += 1;
            }
        }

        changed
    }

    /// Detects a card observed in two places within one snapshot.
    pub fn check_snapshot(snapshot: &Snapshot) -> Result<(), AdvisorError> {
        let mut seen = [false; DECK_SIZE];
        let reserve = snapshot.reserve.iter().flatten().copied();
        for card in snapshot.visible_cards().chain(reserve) {
            if std::mem::replace(&mut seen[card.index()], true) {
                return Err(AdvisorError::Malformed(card));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Slot;

    fn card(text: &str) -> Card {
        text.parse().expect("valid card")
    }

    fn assert_partition(tracker: &KnowledgeTracker) {
        let total =
            tracker.missing().len() + tracker.in_reserve().len() + tracker.in_play().len();
        assert_eq!(total, DECK_SIZE);
    }

    #[test]
    fn fresh_tracker_has_everything_missing() {
        let tracker = KnowledgeTracker::new(DrawMode::Single);
        assert_eq!(tracker.missing().len(), DECK_SIZE);
        assert!(tracker.in_reserve().is_empty());
        assert_eq!(tracker.seen_reserve_count(), 0);
    }

    #[test]
    fn reserve_cards_move_to_play_when_placed() {
        let mut tracker = KnowledgeTracker::new(DrawMode::Single);
        let mut snapshot = Snapshot::empty();
        snapshot.reserve[0] = Some(card("9H"));
        assert_eq!(tracker.update(&snapshot), 1);
        assert_eq!(tracker.in_reserve(), vec![card("9H")]);
        assert_partition(&tracker);

        snapshot.reserve[0] = None;
        snapshot.columns[2] = vec![Slot::FaceDown, Slot::Up(card("TS")), Slot::Up(card("9H"))];
        tracker.update(&snapshot);
        assert!(tracker.is_in_play(card("9H")));
        assert!(tracker.is_in_play(card("TS")));
        assert!(tracker.in_reserve().is_empty());
        assert_eq!(tracker.seen_reserve_count(), 1);
        assert_partition(&tracker);
    }

    #[test]
    fn triple_draw_records_oldest_exposure_first() {
        let mut tracker = KnowledgeTracker::new(DrawMode::Triple);
        let mut snapshot = Snapshot::empty();
        snapshot.reserve = [Some(card("3C")), Some(card("QD")), Some(card("7S"))];
        assert_eq!(tracker.update(&snapshot), 3);
        assert_eq!(tracker.in_reserve(), vec![card("7S"), card("QD"), card("3C")]);
    }

    #[test]
    fn single_draw_ignores_buried_reserve_cards() {
        let mut tracker = KnowledgeTracker::new(DrawMode::Single);
        let mut snapshot = Snapshot::empty();
        snapshot.reserve = [Some(card("3C")), Some(card("QD")), None];
        tracker.update(&snapshot);
        assert_eq!(tracker.in_reserve(), vec![card("3C")]);
    }

    #[test]
    fn update_is_idempotent() {
        let mut tracker = KnowledgeTracker::new(DrawMode::Single);
        let mut snapshot = Snapshot::empty();
        snapshot.reserve[0] = Some(card("AH"));
        snapshot.foundations[0] = Some(card("2S"));
        assert_eq!(tracker.update(&snapshot), 2);
        let before = tracker.clone();
        assert_eq!(tracker.update(&snapshot), 0);
        assert_eq!(tracker, before);
    }

    #[test]
    fn duplicate_cards_are_reported() {
        let mut snapshot = Snapshot::empty();
        snapshot.columns[0] = vec![Slot::Up(card("5D"))];
        snapshot.reserve[0] = Some(card("5D"));
        assert_eq!(
            KnowledgeTracker::check_snapshot(&snapshot),
            Err(AdvisorError::Malformed(card("5D")))
        );
    }
}
