//! Klondike solitaire advisory engine: tracks what is known about hidden cards
//! and recommends one move per call through a prioritized heuristic cascade.

pub mod action;
pub mod advisor;
pub mod card;
pub mod chain;
pub mod error;
pub mod proposer;
pub mod proposers;
pub mod stall;
pub mod state;
pub mod stats;
pub mod table;
pub mod tracker;
pub mod transcript;
pub mod visualize;

pub use crate::action::Directive;
pub use crate::advisor::{Advisor, AdvisorConfig};
pub use crate::card::{Card, Color, Suit};
pub use crate::chain::{bridge, chain_exists, parity_feasible};
pub use crate::error::{
    AdvisorError, InvalidMove, ParseCardError, ParseDirectiveError, TableError, TranscriptError,
};
pub use crate::proposer::{Cascade, Context, Proposal, Proposer};
pub use crate::proposers::registry::{
    CANONICAL_ORDER, canonical_cascade, cascade_from_names, create_proposer,
};
pub use crate::stall::{Progress, StallDetector};
pub use crate::state::{DrawMode, Slot, Snapshot, Solitaire};
pub use crate::stats::SessionStats;
pub use crate::table::{Table, TableBuilder, TableConfig};
pub use crate::tracker::{Knowledge, KnowledgeTracker};
pub use crate::transcript::{DealRecord, Transcript, Turn};
pub use crate::visualize::{
    VisualOptions, describe_directive, render_knowledge, render_snapshot,
    render_snapshot_with_options,
};
