//! Chain-existence oracle.
//!
//! Decides whether cards known to be in the reserve could bridge two visible
//! cards with an alternating-color run descending one rank at a time.

use crate::card::{Card, Color};
use crate::tracker::KnowledgeTracker;

/// Rank gap and color parity allow a bridge between `start` and `target`.
///
/// Each step flips color, so an odd gap needs opposite colors and an even gap
/// needs matching ones.
pub fn parity_feasible(start: Card, target: Card) -> bool {
    let delta = start.rank() as i16 - target.rank() as i16;
    if delta < 1 {
        return false;
    }
    let color_bit = i16::from(start.color() != target.color());
    delta % 2 == color_bit
}

/// One interior link of a bridge: the reserve cards able to fill it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub rank: u8,
    pub color: Color,
    pub candidates: Vec<Card>,
}

/// Interior links between `start` and `target` (both exclusive), highest rank
/// first. `None` when parity rules the chain out or some rank has no
/// candidate in the reserve.
pub fn bridge(start: Card, target: Card, tracker: &KnowledgeTracker) -> Option<Vec<Link>> {
    if !parity_feasible(start, target) {
        return None;
    }
    let mut links = Vec::new();
    let mut color = start.color().opposite();
    for rank in (target.rank() + 1..start.rank()).rev() {
        let candidates: Vec<Card> = Card::of_color(rank, color)?
            .into_iter()
            .filter(|card| tracker.is_in_reserve(*card))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        links.push(Link {
            rank,
            color,
            candidates,
        });
        color = color.opposite();
    }
    Some(links)
}

pub fn chain_exists(start: Card, target: Card, tracker: &KnowledgeTracker) -> bool {
    bridge(start, target, tracker).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DrawMode, Snapshot};

    fn card(text: &str) -> Card {
        text.parse().expect("valid card")
    }

    /// Tracker whose reserve holds exactly `cards`.
    fn tracker_with_reserve(cards: &[&str]) -> KnowledgeTracker {
        let mut tracker = KnowledgeTracker::new(DrawMode::Single);
        for text in cards {
            let mut snapshot = Snapshot::empty();
            snapshot.reserve[0] = Some(card(text));
            tracker.update(&snapshot);
        }
        tracker
    }

    #[test]
    fn parity_examples() {
        assert!(parity_feasible(card("7S"), card("4H")));
        assert!(parity_feasible(card("7S"), card("5C")));
        assert!(!parity_feasible(card("7S"), card("3H")));
        assert!(!parity_feasible(card("7S"), card("7H")));
        assert!(!parity_feasible(card("4S"), card("7H")));
    }

    #[test]
    fn infeasible_parity_fails_even_with_full_reserve() {
        let tracker = tracker_with_reserve(&[
            "6H", "6D", "5S", "5C", "4H", "4D", "3S", "3C", "2H", "2D",
        ]);
        assert!(!chain_exists(card("7S"), card("3H"), &tracker));
        assert!(!chain_exists(card("7S"), card("5H"), &tracker));
    }

    #[test]
    fn adjacent_cards_need_no_interior() {
        let tracker = tracker_with_reserve(&[]);
        assert!(chain_exists(card("8D"), card("7C"), &tracker));
        assert!(!chain_exists(card("8D"), card("7H"), &tracker));
    }

    #[test]
    fn every_interior_rank_needs_a_reserve_card() {
        let tracker = tracker_with_reserve(&["6D", "5C"]);
        assert!(chain_exists(card("7S"), card("4H"), &tracker));

        let links = bridge(card("7S"), card("4H"), &tracker).expect("bridge");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].rank, 6);
        assert_eq!(links[0].color, Color::Red);
        assert_eq!(links[0].candidates, vec![card("6D")]);
        assert_eq!(links[1].candidates, vec![card("5C")]);

        let gap = tracker_with_reserve(&["6D"]);
        assert!(!chain_exists(card("7S"), card("4H"), &gap));
    }

    #[test]
    fn wrong_color_fillers_do_not_count() {
        let tracker = tracker_with_reserve(&["6S"]);
        assert!(!chain_exists(card("7S"), card("5C"), &tracker));
        let tracker = tracker_with_reserve(&["6H"]);
        assert!(chain_exists(card("7S"), card("5C"), &tracker));
    }
}
