use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::card::COLUMN_COUNT;
use crate::error::ParseDirectiveError;

/// Move recommendation handed to the consumer.
///
/// Notes are human-readable annotations rendered in parentheses; they never
/// carry control meaning and are dropped when parsing.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Directive {
    /// Advance the reserve.
    Cycle { note: Option<String> },
    /// Reserve top to its foundation.
    StockToFoundation,
    /// Accessible card of a column to its foundation.
    BoardToFoundation { column: usize },
    /// Reserve top onto a column.
    StockToBoard { column: usize, note: Option<String> },
    /// Relocate the run starting `offset` cards into the source's face-up run.
    Move {
        from: usize,
        to: usize,
        offset: usize,
    },
    /// Deal finished or stalled; start a new deal and rebind.
    Reset { note: Option<String> },
}

impl Directive {
    pub fn cycle() -> Self {
        Directive::Cycle { note: None }
    }

    pub fn cycle_with(note: impl Into<String>) -> Self {
        Directive::Cycle {
            note: Some(note.into()),
        }
    }

    pub fn reset() -> Self {
        Directive::Reset { note: None }
    }

    pub fn reset_with(note: impl Into<String>) -> Self {
        Directive::Reset {
            note: Some(note.into()),
        }
    }

    pub fn stock_to_board(column: usize) -> Self {
        Directive::StockToBoard { column, note: None }
    }

    pub fn move_run(from: usize, to: usize) -> Self {
        Directive::Move {
            from,
            to,
            offset: 0,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Directive::Cycle { .. } => "cycle",
            Directive::StockToFoundation => "stf",
            Directive::BoardToFoundation { .. } => "btf",
            Directive::StockToBoard { .. } => "stb",
            Directive::Move { .. } => "move",
            Directive::Reset { .. } => "reset",
        }
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, Directive::Cycle { .. })
    }

    pub fn is_reset(&self) -> bool {
        matches!(self, Directive::Reset { .. })
    }

    pub fn note(&self) -> Option<&str> {
        match self {
            Directive::Cycle { note }
            | Directive::StockToBoard { note, .. }
            | Directive::Reset { note } => note.as_deref(),
            _ => None,
        }
    }

    /// Same directive with the annotation stripped.
    pub fn without_note(&self) -> Self {
        match self {
            Directive::Cycle { .. } => Directive::cycle(),
            Directive::StockToBoard { column, .. } => Directive::stock_to_board(*column),
            Directive::Reset { .. } => Directive::reset(),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Cycle { .. } | Directive::StockToFoundation | Directive::Reset { .. } => {
                write!(f, "{}", self.verb())?
            }
            Directive::BoardToFoundation { column } => write!(f, "btf {column}")?,
            Directive::StockToBoard { column, .. } => write!(f, "stb {column}")?,
            Directive::Move { from, to, offset } => {
                write!(f, "move {from} {to}")?;
                if *offset > 0 {
                    write!(f, " {offset}")?;
                }
            }
        }
        if let Some(note) = self.note() {
            write!(f, " ({note})")?;
        }
        Ok(())
    }
}

impl FromStr for Directive {
    type Err = ParseDirectiveError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let command = input.split_once('(').map_or(input, |(head, _)| head);
        let mut parts = command.split_whitespace();
        let verb = parts
            .next()
            .ok_or(ParseDirectiveError::Empty)?
            .to_ascii_lowercase();
        match verb.as_str() {
            "cycle" => Ok(Directive::cycle()),
            "stf" => Ok(Directive::StockToFoundation),
            "reset" => Ok(Directive::reset()),
            "btf" => {
                let column = parse_column(parts.next(), "btf", "<column>")?;
                Ok(Directive::BoardToFoundation { column })
            }
            "stb" => {
                let column = parse_column(parts.next(), "stb", "<column>")?;
                Ok(Directive::stock_to_board(column))
            }
            "move" => {
                let from = parse_column(parts.next(), "move", "<start> <end> [offset]")?;
                let to = parse_column(parts.next(), "move", "<start> <end> [offset]")?;
                let offset = match parts.next() {
                    Some(text) => parse_number(text)?,
                    None => 0,
                };
                Ok(Directive::Move { from, to, offset })
            }
            other => Err(ParseDirectiveError::UnknownVerb(other.to_string())),
        }
    }
}

fn parse_number(text: &str) -> Result<usize, ParseDirectiveError> {
    text.parse::<usize>()
        .map_err(|_| ParseDirectiveError::InvalidNumber(text.to_string()))
}

fn parse_column(
    text: Option<&str>,
    verb: &'static str,
    expected: &'static str,
) -> Result<usize, ParseDirectiveError> {
    let text = text.ok_or(ParseDirectiveError::MissingArgument { verb, expected })?;
    let column = parse_number(text)?;
    if column >= COLUMN_COUNT {
        return Err(ParseDirectiveError::ColumnRange(column));
    }
    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_grammar_with_optional_notes() {
        assert_eq!(Directive::cycle().to_string(), "cycle");
        assert_eq!(
            Directive::cycle_with("searching for 6H/6D").to_string(),
            "cycle (searching for 6H/6D)"
        );
        assert_eq!(Directive::BoardToFoundation { column: 3 }.to_string(), "btf 3");
        assert_eq!(Directive::move_run(1, 4).to_string(), "move 1 4");
        assert_eq!(
            Directive::Move { from: 6, to: 0, offset: 2 }.to_string(),
            "move 6 0 2"
        );
    }

    #[test]
    fn parsing_ignores_annotations() {
        let parsed: Directive = "stb 2 (frees 5H from column 4)".parse().unwrap();
        assert_eq!(parsed, Directive::stock_to_board(2));
        let parsed: Directive = "cycle (learning the reserve)".parse().unwrap();
        assert_eq!(parsed, Directive::cycle());
        let parsed: Directive = "MOVE 5 1 3".parse().unwrap();
        assert_eq!(parsed, Directive::Move { from: 5, to: 1, offset: 3 });
    }

    #[test]
    fn rejects_bad_columns_and_verbs() {
        assert_eq!(
            "btf 7".parse::<Directive>(),
            Err(ParseDirectiveError::ColumnRange(7))
        );
        assert!(matches!(
            "move 1".parse::<Directive>(),
            Err(ParseDirectiveError::MissingArgument { verb: "move", .. })
        ));
        assert!(matches!(
            "ftb 0 1".parse::<Directive>(),
            Err(ParseDirectiveError::UnknownVerb(_))
        ));
        assert_eq!("   ".parse::<Directive>(), Err(ParseDirectiveError::Empty));
    }
}
