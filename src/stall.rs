use serde::{Deserialize, Serialize};
use tracing::info;

use crate::action::Directive;
use crate::card::Card;
use crate::proposer::Proposal;
use crate::state::DrawMode;

/// Solver progress across advisory calls.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Progress {
    /// A move was proposed this turn.
    #[default]
    Normal,
    /// Nothing productive; cycling the reserve in search of new information.
    Stumped,
    /// A full reserve cycle passed without progress. Terminal until rebound.
    GaveUp,
}

/// Stall and cycle detection wrapped around the cascade outcome.
///
/// A stall ends in `GaveUp` as soon as the reserve top seen when it began
/// shows up again, or once more unproductive calls have passed than a full
/// rotation of the reserve can take. The second bound holds whatever the draw
/// phase, so it also covers anchors that never return to the top.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StallDetector {
    mode: DrawMode,
    progress: Progress,
    /// First non-empty reserve top observed during the current stall.
    anchor: Option<Card>,
    stumped_calls: usize,
}

impl StallDetector {
    pub fn new(mode: DrawMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn anchor(&self) -> Option<Card> {
        self.anchor
    }

    /// Unproductive calls in the current stall.
    pub fn stumped_calls(&self) -> usize {
        self.stumped_calls
    }

    /// Unproductive calls tolerated for a reserve of `reserve_len` cards.
    ///
    /// Single draw recycles and draws in the same call, so `reserve_len`
    /// cycles show every card. Triple draw may first finish a pass whose
    /// grouping was shifted by earlier plays, then needs one aligned pass.
    pub fn patience(mode: DrawMode, reserve_len: usize) -> usize {
        let per_pass = reserve_len.div_ceil(mode.cards_per_cycle());
        match mode {
            DrawMode::Single => per_pass + 1,
            DrawMode::Triple => 2 * per_pass + 1,
        }
    }

    /// Folds one cascade outcome into the machine and returns the directive
    /// for the consumer.
    ///
    /// `learned` reports that this call's observation classified a new card;
    /// a stall only counts cycles that taught nothing.
    pub fn observe(
        &mut self,
        proposal: Option<Proposal>,
        reserve_top: Option<Card>,
        reserve_len: usize,
        learned: bool,
    ) -> Directive {
        if self.progress == Progress::GaveUp {
            return Directive::reset_with("gave up on this deal");
        }

        let speculative = match proposal {
            Some(proposal) if !proposal.speculative => {
                self.progress = Progress::Normal;
                self.anchor = None;
                self.stumped_calls = 0;
                return proposal.directive;
            }
            Some(proposal) => Some(proposal.directive),
            None => None,
        };

        if learned {
            self.anchor = None;
            self.stumped_calls = 0;
        }
        if reserve_top.is_some() && self.anchor == reserve_top {
            return self.give_up(reserve_top, "no progress over a full reserve cycle");
        }
        if self.stumped_calls >= Self::patience(self.mode, reserve_len) {
            return self.give_up(reserve_top, "no progress after a full reserve rotation");
        }
        if self.anchor.is_none() {
            self.anchor = reserve_top;
        }
        self.stumped_calls += 1;
        self.progress = Progress::Stumped;
        speculative.unwrap_or_else(Directive::cycle)
    }

    fn give_up(&mut self, reserve_top: Option<Card>, note: &str) -> Directive {
        info!(
            anchor = ?self.anchor,
            top = ?reserve_top,
            calls = self.stumped_calls,
            "giving up on deal"
        );
        self.progress = Progress::GaveUp;
        Directive::reset_with(note)
    }
}
