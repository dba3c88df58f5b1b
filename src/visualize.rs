use std::fmt::Write;

use crate::action::Directive;
use crate::card::{COLUMN_COUNT, Card, RESERVE_SIZE};
use crate::state::{Slot, Snapshot};
use crate::tracker::KnowledgeTracker;

/// Customize board rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    /// Show all revealed reserve cards instead of only the playable one.
    pub show_reserve_fan: bool,
    pub show_column_index: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_reserve_fan: false,
            show_column_index: true,
        }
    }
}

pub fn render_snapshot(snapshot: &Snapshot) -> String {
    render_snapshot_with_options(snapshot, VisualOptions::default())
}

/// Reserve and foundations on the first line, then the columns top-down,
/// `##` marking a face-down card.
pub fn render_snapshot_with_options(snapshot: &Snapshot, options: VisualOptions) -> String {
    let mut out = String::new();
    let _ = write!(out, "## ");
    if options.show_reserve_fan {
        for card in snapshot.reserve.iter().rev() {
            let _ = write!(out, "{} ", format_card(*card));
        }
    } else {
        let _ = write!(out, "{} ", format_card(snapshot.reserve_top()));
    }
    let _ = write!(out, "   ");
    let foundations = snapshot
        .foundations
        .iter()
        .map(|top| format_card(*top))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "{foundations}");
    if options.show_column_index {
        let _ = writeln!(out, "-0--1--2--3--4--5--6");
    }

    let tallest = snapshot.columns.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..tallest {
        let mut line = String::new();
        for column in 0..COLUMN_COUNT {
            let cell = match snapshot.columns[column].get(row) {
                None => String::from("  "),
                Some(Slot::FaceDown) => String::from("##"),
                Some(Slot::Up(card)) => card.to_string(),
            };
            let _ = write!(line, "{cell} ");
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// Summary of what the advisor has learned about the reserve.
pub fn render_knowledge(tracker: &KnowledgeTracker) -> String {
    let reserve = tracker
        .in_reserve()
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "Reserve seen: {}/{}  unseen: {}  [{}]",
        tracker.seen_reserve_count(),
        RESERVE_SIZE,
        tracker.missing().len(),
        reserve
    )
}

/// Plain-language description of a directive against the board it was
/// computed for.
pub fn describe_directive(snapshot: &Snapshot, directive: &Directive) -> String {
    let description = match directive {
        Directive::Cycle { .. } => String::from("Turn the reserve"),
        Directive::StockToFoundation => format!(
            "Bank {} from the reserve",
            format_card(snapshot.reserve_top())
        ),
        Directive::BoardToFoundation { column } => format!(
            "Bank {} from column {column}",
            format_card(snapshot.accessible(*column))
        ),
        Directive::StockToBoard { column, .. } => format!(
            "Play {} from the reserve onto column {column}",
            format_card(snapshot.reserve_top())
        ),
        Directive::Move { from, to, offset } => {
            let base = snapshot.face_up(*from).get(*offset).copied();
            let target = match snapshot.accessible(*to) {
                Some(card) => card.to_string(),
                None => String::from("the empty column"),
            };
            format!(
                "Move the run from {} in column {from} onto {target} in column {to}",
                format_card(base)
            )
        }
        Directive::Reset { .. } => String::from("Start a new deal"),
    };
    match directive.note() {
        Some(note) => format!("{description} ({note})"),
        None => description,
    }
}

fn format_card(card: Option<Card>) -> String {
    card.map_or_else(|| String::from("--"), |card| card.to_string())
}
