use tracing::{debug, warn};

use crate::action::Directive;
use crate::error::AdvisorError;
use crate::proposer::{Cascade, Context, Proposal};
use crate::stall::{Progress, StallDetector};
use crate::state::{DrawMode, Snapshot, Solitaire};
use crate::tracker::KnowledgeTracker;

/// Options fixed when the advisor is built.
#[derive(Clone, Copy, Debug)]
pub struct AdvisorConfig {
    /// Reject snapshots that show one card in two places.
    pub validate_snapshots: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            validate_snapshots: cfg!(debug_assertions),
        }
    }
}

/// Per-deal inference and progress state.
#[derive(Clone, Debug)]
struct Session {
    tracker: KnowledgeTracker,
    stall: StallDetector,
}

/// Advisory engine: recommends one move per call for the bound deal.
///
/// One instance serves one deal at a time; use separate instances for
/// concurrent deals.
pub struct Advisor {
    config: AdvisorConfig,
    cascade: Cascade,
    session: Option<Session>,
}

impl Advisor {
    pub fn new() -> Self {
        Self::with_cascade(Cascade::default())
    }

    pub fn with_cascade(cascade: Cascade) -> Self {
        Self {
            config: AdvisorConfig::default(),
            cascade,
            session: None,
        }
    }

    pub fn with_config(mut self, config: AdvisorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    /// Starts a fresh deal, discarding everything learned so far.
    pub fn bind(&mut self, mode: DrawMode) {
        debug!(?mode, "advisor bound to new deal");
        self.session = Some(Session {
            tracker: KnowledgeTracker::new(mode),
            stall: StallDetector::new(mode),
        });
    }

    /// Binds using the draw mode reported by `game`.
    pub fn bind_to<S: Solitaire + ?Sized>(&mut self, game: &S) {
        self.bind(game.draw_mode());
    }

    pub fn unbind(&mut self) {
        self.session = None;
    }

    pub fn is_bound(&self) -> bool {
        self.session.is_some()
    }

    pub fn draw_mode(&self) -> Option<DrawMode> {
        self.session.as_ref().map(|s| s.tracker.mode())
    }

    pub fn tracker(&self) -> Option<&KnowledgeTracker> {
        self.session.as_ref().map(|s| &s.tracker)
    }

    pub fn progress(&self) -> Option<Progress> {
        self.session.as_ref().map(|s| s.stall.progress())
    }

    /// Runs the cascade against the current knowledge without updating any
    /// state.
    pub fn propose(&self, snapshot: &Snapshot) -> Result<Option<Proposal>, AdvisorError> {
        let session = self.session.as_ref().ok_or(AdvisorError::NotBound)?;
        Ok(self
            .cascade
            .propose(&Context::new(snapshot, &session.tracker)))
    }

    /// Observes `game` and returns the recommended directive.
    pub fn advise<S: Solitaire + ?Sized>(&mut self, game: &S) -> Result<Directive, AdvisorError> {
        let mode = self.draw_mode().ok_or(AdvisorError::NotBound)?;
        let snapshot = Snapshot::observe(game, mode);
        self.advise_snapshot(&snapshot)
    }

    /// Tracker update, cascade, then stall bookkeeping.
    pub fn advise_snapshot(&mut self, snapshot: &Snapshot) -> Result<Directive, AdvisorError> {
        let session = self.session.as_mut().ok_or(AdvisorError::NotBound)?;
        if self.config.validate_snapshots {
            if let Err(err) = KnowledgeTracker::check_snapshot(snapshot) {
                warn!(%err, "rejecting snapshot");
                return Err(err);
            }
        }
        let learned = session.tracker.update(snapshot) > 0;
        let proposal = self
            .cascade
            .propose(&Context::new(snapshot, &session.tracker));
        Ok(session.stall.observe(
            proposal,
            snapshot.reserve_top(),
            snapshot.reserve_len(),
            learned,
        ))
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new()
    }
}
