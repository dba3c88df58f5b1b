use tracing::debug;

use crate::action::Directive;
use crate::state::{DrawMode, Snapshot};
use crate::tracker::KnowledgeTracker;

/// Everything a proposer may read during one advisory call.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub snapshot: &'a Snapshot,
    pub tracker: &'a KnowledgeTracker,
}

impl<'a> Context<'a> {
    pub fn new(snapshot: &'a Snapshot, tracker: &'a KnowledgeTracker) -> Self {
        Self { snapshot, tracker }
    }

    pub fn mode(&self) -> DrawMode {
        self.tracker.mode()
    }
}

/// A single heuristic of the decision cascade.
pub trait Proposer {
    fn name(&self) -> &'static str;

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive>;

    /// Speculative proposers only cycle the reserve in search of information;
    /// the stall detector does not count them as progress.
    fn speculative(&self) -> bool {
        false
    }
}

/// Outcome of the first proposer that fired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proposal {
    pub proposer: &'static str,
    pub directive: Directive,
    pub speculative: bool,
}

/// Ordered list of proposers; the first one that fires wins.
pub struct Cascade {
    proposers: Vec<Box<dyn Proposer>>,
}

impl Cascade {
    pub fn new(proposers: Vec<Box<dyn Proposer>>) -> Self {
        Self { proposers }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.proposers.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.proposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposers.is_empty()
    }

    pub fn propose(&self, ctx: &Context<'_>) -> Option<Proposal> {
        self.proposers.iter().find_map(|proposer| {
            let directive = proposer.propose(ctx)?;
            debug!(proposer = proposer.name(), %directive, "proposer fired");
            Some(Proposal {
                proposer: proposer.name(),
                directive,
                speculative: proposer.speculative(),
            })
        })
    }
}

impl Default for Cascade {
    fn default() -> Self {
        crate::proposers::registry::canonical_cascade()
    }
}
