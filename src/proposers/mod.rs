pub mod cycle;
pub mod foundation;
pub mod registry;
pub mod reserve;
pub mod tableau;

pub use cycle::{CycleForChain, CycleForFiller, CycleToLearn};
pub use foundation::{
    AnyBoardToFoundation, AnyReserveToFoundation, BoardToFoundation, ReserveToFoundation,
    Victory,
};
pub use reserve::{ReserveAnywhere, ReserveChainLink, ReserveKing, ReserveWithFollowUp};
pub use tableau::{ChainMove, KingRelocation, SplitRunForFoundation};

use crate::state::Snapshot;

/// Which end of the board wins a tie on face-down count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tie {
    Leftmost,
    Rightmost,
}

/// Column with the most face-down cards among `candidates`.
pub(crate) fn most_face_down(
    snapshot: &Snapshot,
    candidates: impl IntoIterator<Item = usize>,
    tie: Tie,
) -> Option<usize> {
    candidates.into_iter().fold(None, |best, col| {
        let Some(current) = best else {
            return Some(col);
        };
        let (ours, theirs) = (snapshot.face_down(col), snapshot.face_down(current));
        let wins_tie = match tie {
            Tie::Leftmost => col < current,
            Tie::Rightmost => col > current,
        };
        if ours > theirs || (ours == theirs && wins_tie) {
            Some(col)
        } else {
            Some(current)
        }
    })
}
