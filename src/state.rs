use std::array::from_fn;

use serde::{Deserialize, Serialize};

use crate::card::{COLUMN_COUNT, Card, DECK_SIZE, FOUNDATION_COUNT, MAX_RANK, Suit};

/// Reserve semantics fixed for the lifetime of a deal.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DrawMode {
    /// One card turned per cycle.
    #[default]
    Single,
    /// Three cards turned per cycle; only the foremost is playable.
    Triple,
}

impl DrawMode {
    pub fn cards_per_cycle(self) -> usize {
        match self {
            DrawMode::Single => 1,
            DrawMode::Triple => 3,
        }
    }
}

/// One position of a tableau column.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Slot {
    FaceDown,
    Up(Card),
}

impl Slot {
    pub fn card(self) -> Option<Card> {
        match self {
            Slot::Up(card) => Some(card),
            Slot::FaceDown => None,
        }
    }
}

/// Read-only contract of the game engine the advisor observes.
pub trait Solitaire {
    fn draw_mode(&self) -> DrawMode;

    /// Seven columns, face-down placeholders first.
    fn columns(&self) -> [Vec<Slot>; COLUMN_COUNT];

    /// Highest banked card per suit, indexed in [`Suit`] order.
    fn foundations(&self) -> [Option<Card>; FOUNDATION_COUNT];

    fn peek_reserve(&self) -> Option<Card>;

    /// Up to three revealed waste cards, top to bottom.
    fn peek_reserve_three(&self) -> [Option<Card>; 3];
}

/// Call-scoped view of the board handed to every proposer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub columns: [Vec<Slot>; COLUMN_COUNT],
    pub foundations: [Option<Card>; FOUNDATION_COUNT],
    /// Revealed reserve cards, top to bottom. Only `reserve[0]` is playable.
    pub reserve: [Option<Card>; 3],
}

impl Snapshot {
    /// Queries `game` once; only the top reserve card is read in single-draw mode.
    pub fn observe<S: Solitaire + ?Sized>(game: &S, mode: DrawMode) -> Self {
        let reserve = match mode {
            DrawMode::Single => [game.peek_reserve(), None, None],
            DrawMode::Triple => game.peek_reserve_three(),
        };
        Self {
            columns: game.columns(),
            foundations: game.foundations(),
            reserve,
        }
    }

    pub fn empty() -> Self {
        Self {
            columns: from_fn(|_| Vec::new()),
            foundations: [None; FOUNDATION_COUNT],
            reserve: [None; 3],
        }
    }

    #[inline]
    pub fn reserve_top(&self) -> Option<Card> {
        self.reserve[0]
    }

    /// The exposed card at the end of a column.
    pub fn accessible(&self, column: usize) -> Option<Card> {
        self.columns[column].last().and_then(|slot| slot.card())
    }

    /// First face-up card of a column: the root of its movable run.
    pub fn root(&self, column: usize) -> Option<Card> {
        self.columns[column].iter().find_map(|slot| slot.card())
    }

    pub fn face_down(&self, column: usize) -> usize {
        self.columns[column]
            .iter()
            .take_while(|slot| matches!(slot, Slot::FaceDown))
            .count()
    }

    /// Face-up run of a column, root first.
    pub fn face_up(&self, column: usize) -> Vec<Card> {
        self.columns[column]
            .iter()
            .filter_map(|slot| slot.card())
            .collect()
    }

    pub fn is_empty_column(&self, column: usize) -> bool {
        self.columns[column].is_empty()
    }

    pub fn empty_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLUMN_COUNT).filter(|&col| self.is_empty_column(col))
    }

    /// Rank banked on the foundation of `suit`, 0 when empty.
    pub fn foundation_rank(&self, suit: Suit) -> u8 {
        self.foundations[suit.index()].map_or(0, |card| card.rank())
    }

    pub fn min_foundation_rank(&self) -> u8 {
        Suit::ALL
            .iter()
            .map(|&suit| self.foundation_rank(suit))
            .min()
            .unwrap_or(0)
    }

    /// Legal on its own foundation right now.
    pub fn promotable(&self, card: Card) -> bool {
        self.foundation_rank(card.suit()) + 1 == card.rank()
    }

    /// Promotable without risk of stranding a lower tableau card.
    pub fn safely_promotable(&self, card: Card) -> bool {
        card.rank() == self.min_foundation_rank() + 1 && self.promotable(card)
    }

    /// Cards still in stock and waste: everything not on the tableau or
    /// banked.
    pub fn reserve_len(&self) -> usize {
        let tableau: usize = self.columns.iter().map(Vec::len).sum();
        let banked: usize = Suit::ALL
            .iter()
            .map(|&suit| usize::from(self.foundation_rank(suit)))
            .sum();
        DECK_SIZE.saturating_sub(tableau + banked)
    }

    pub fn is_complete(&self) -> bool {
        Suit::ALL
            .iter()
            .all(|&suit| self.foundation_rank(suit) == MAX_RANK)
    }

    /// True when `card` may be placed at the end of `column`.
    pub fn accepts(&self, column: usize, card: Card) -> bool {
        if self.is_empty_column(column) {
            return card.is_king();
        }
        self.accessible(column)
            .is_some_and(|target| card.stacks_on(target))
    }

    /// Every face-up card, then every foundation top.
    pub fn visible_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.columns
            .iter()
            .flat_map(|column| column.iter().filter_map(|slot| slot.card()))
            .chain(self.foundations.iter().flatten().copied())
    }
}
