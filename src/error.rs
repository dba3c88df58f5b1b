use thiserror::Error;

use crate::card::Card;

/// Errors surfaced by the advisory engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("advisor is not bound to a deal")]
    NotBound,
    #[error("malformed snapshot: {0} observed more than once")]
    Malformed(Card),
    #[error("unknown proposer '{0}'")]
    UnknownProposer(String),
}

/// Errors raised by the reference table when executing directives.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("deal is complete")]
    DealComplete,
}

/// Details of rejected directives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidMove {
    #[error("column index {0} is out of range")]
    ColumnIndex(usize),
    #[error("no card available in the selected source")]
    NoCardAvailable,
    #[error("{card} cannot be placed on {target}")]
    CannotStack { card: Card, target: Card },
    #[error("only a king may fill an empty column, got {0}")]
    NotAKing(Card),
    #[error("{0} does not follow its foundation")]
    FoundationMismatch(Card),
    #[error("offset {offset} exceeds the face-up run of column {column}")]
    Offset { column: usize, offset: usize },
    #[error("source and destination column are both {0}")]
    SameColumn(usize),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("empty card notation")]
    Empty,
    #[error("unrecognized rank in '{0}'")]
    Rank(String),
    #[error("unrecognized suit in '{0}'")]
    Suit(String),
    #[error("rank {0} is outside 1..=13")]
    RankRange(u8),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseDirectiveError {
    #[error("empty directive")]
    Empty,
    #[error("unknown verb '{0}'")]
    UnknownVerb(String),
    #[error("'{verb}' expects {expected}")]
    MissingArgument {
        verb: &'static str,
        expected: &'static str,
    },
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("column {0} is out of range (0..6)")]
    ColumnRange(usize),
}

/// Failures while persisting or loading a transcript.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to encode transcript: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("failed to decode transcript: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    #[error("transcript i/o failed: {0}")]
    Io(#[from] std::io::Error),
}
