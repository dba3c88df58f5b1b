use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseCardError;

pub const MIN_RANK: u8 = 1;
pub const MAX_RANK: u8 = 13;
pub const SUIT_COUNT: usize = 4;
pub const DECK_SIZE: usize = 52;
pub const COLUMN_COUNT: usize = 7;
pub const FOUNDATION_COUNT: usize = SUIT_COUNT;
/// Cards left in the reserve after a standard deal.
pub const RESERVE_SIZE: usize = 24;

const RANK_CHARS: [char; 13] = [
    'A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K',
];

/// Suits in foundation order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
}

impl Color {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::Red,
            Color::Red => Color::Black,
        }
    }

    /// The two suits carrying this color.
    pub fn suits(self) -> [Suit; 2] {
        match self {
            Color::Black => [Suit::Spades, Suit::Clubs],
            Color::Red => [Suit::Hearts, Suit::Diamonds],
        }
    }
}

impl Suit {
    pub const ALL: [Suit; SUIT_COUNT] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn color(self) -> Color {
        match self {
            Suit::Spades | Suit::Clubs => Color::Black,
            Suit::Hearts | Suit::Diamonds => Color::Red,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'S' | '♠' => Some(Suit::Spades),
            'H' | '♥' => Some(Suit::Hearts),
            'C' | '♣' => Some(Suit::Clubs),
            'D' | '♦' => Some(Suit::Diamonds),
            _ => None,
        }
    }
}

/// A single card of the 52-card deck. Color is derived from the suit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCard")]
pub struct Card {
    rank: u8,
    suit: Suit,
}

/// Wire shape of [`Card`], checked before it becomes one.
#[derive(Deserialize)]
struct RawCard {
    rank: u8,
    suit: Suit,
}

impl TryFrom<RawCard> for Card {
    type Error = ParseCardError;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        Card::new(raw.rank, raw.suit).ok_or(ParseCardError::RankRange(raw.rank))
    }
}

impl Card {
    /// Returns `None` when `rank` lies outside `1..=13`.
    pub fn new(rank: u8, suit: Suit) -> Option<Self> {
        (MIN_RANK..=MAX_RANK)
            .contains(&rank)
            .then_some(Self { rank, suit })
    }

    /// Inverse of [`Card::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= DECK_SIZE {
            return None;
        }
        let suit = Suit::ALL[index / MAX_RANK as usize];
        Some(Self {
            rank: (index % MAX_RANK as usize) as u8 + 1,
            suit,
        })
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub fn suit(self) -> Suit {
        self.suit
    }

    #[inline]
    pub fn color(self) -> Color {
        self.suit.color()
    }

    /// Slot of this card in a 52-entry table.
    #[inline]
    pub fn index(self) -> usize {
        self.suit.index() * MAX_RANK as usize + (self.rank - 1) as usize
    }

    #[inline]
    pub fn is_king(self) -> bool {
        self.rank == MAX_RANK
    }

    /// True when `self` may be stacked on `other` in the tableau.
    #[inline]
    pub fn stacks_on(self, other: Card) -> bool {
        self.color() != other.color() && self.rank + 1 == other.rank
    }

    /// The two cards of `rank` carrying `color`.
    pub fn of_color(rank: u8, color: Color) -> Option<[Card; 2]> {
        let [a, b] = color.suits();
        Some([Card::new(rank, a)?, Card::new(rank, b)?])
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            RANK_CHARS[(self.rank - 1) as usize],
            self.suit.letter()
        )
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let mut chars: Vec<char> = trimmed.chars().collect();
        let suit_char = chars.pop().ok_or(ParseCardError::Empty)?;
        let suit = Suit::from_symbol(suit_char)
            .ok_or_else(|| ParseCardError::Suit(trimmed.to_string()))?;
        let rank_text: String = chars.into_iter().collect();
        let rank = match rank_text.to_ascii_uppercase().as_str() {
            "10" => 10,
            text => {
                let mut it = text.chars();
                match (it.next(), it.next()) {
                    (Some(c), None) => RANK_CHARS
                        .iter()
                        .position(|&r| r == c)
                        .map(|pos| pos as u8 + 1)
                        .ok_or_else(|| ParseCardError::Rank(trimmed.to_string()))?,
                    _ => return Err(ParseCardError::Rank(trimmed.to_string())),
                }
            }
        };
        Ok(Card { rank, suit })
    }
}

/// Builds the 52-card deck in index order (unshuffled).
pub fn full_deck() -> Vec<Card> {
    (0..DECK_SIZE).filter_map(Card::from_index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_the_whole_deck() {
        let deck = full_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        for (idx, card) in deck.iter().enumerate() {
            assert_eq!(card.index(), idx);
        }
    }

    #[test]
    fn parses_letters_symbols_and_ten() {
        assert_eq!("7S".parse::<Card>(), Ok(Card::new(7, Suit::Spades).unwrap()));
        assert_eq!("th".parse::<Card>(), Ok(Card::new(10, Suit::Hearts).unwrap()));
        assert_eq!("10♦".parse::<Card>(), Ok(Card::new(10, Suit::Diamonds).unwrap()));
        assert_eq!("K♣".parse::<Card>(), Ok(Card::new(13, Suit::Clubs).unwrap()));
        assert!("1S".parse::<Card>().is_err());
        assert!("7X".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn decoding_rejects_out_of_range_ranks() {
        let config = bincode::config::standard();
        for rank in [0u8, 14] {
            let bytes = bincode::serde::encode_to_vec((rank, Suit::Hearts), config)
                .expect("encodes");
            let decoded: Result<(Card, usize), _> =
                bincode::serde::decode_from_slice(&bytes, config);
            assert!(decoded.is_err(), "rank {rank} accepted");
        }

        let bytes = bincode::serde::encode_to_vec((12u8, Suit::Hearts), config).expect("encodes");
        let (card, _): (Card, usize) =
            bincode::serde::decode_from_slice(&bytes, config).expect("decodes");
        assert_eq!(card, Card::new(12, Suit::Hearts).unwrap());
    }

    #[test]
    fn display_uses_single_character_ranks() {
        assert_eq!(Card::new(10, Suit::Clubs).unwrap().to_string(), "TC");
        assert_eq!(Card::new(1, Suit::Diamonds).unwrap().to_string(), "AD");
    }

    #[test]
    fn stacking_needs_alternating_color_and_one_rank_lower() {
        let six_hearts = Card::new(6, Suit::Hearts).unwrap();
        let seven_spades = Card::new(7, Suit::Spades).unwrap();
        let seven_diamonds = Card::new(7, Suit::Diamonds).unwrap();
        assert!(six_hearts.stacks_on(seven_spades));
        assert!(!six_hearts.stacks_on(seven_diamonds));
        assert!(!seven_spades.stacks_on(six_hearts));
    }
}
