use crate::action::Directive;
use crate::card::{COLUMN_COUNT, Card};
use crate::proposer::{Context, Proposer};
use crate::proposers::{Tie, most_face_down};
use crate::state::Snapshot;

/// Moves a King sitting on face-down cards into an empty column.
///
/// Policy:
/// - Target is the leftmost empty column.
/// - Among several such Kings, the one covering the most face-down cards
///   moves first; ties go left.
#[derive(Clone, Copy, Debug, Default)]
pub struct KingRelocation;

impl Proposer for KingRelocation {
    fn name(&self) -> &'static str {
        "king-relocation"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        let snapshot = ctx.snapshot;
        let target = snapshot.empty_columns().next()?;
        let kings = (0..COLUMN_COUNT).filter(|&col| {
            snapshot.face_down(col) > 0 && snapshot.root(col).is_some_and(Card::is_king)
        });
        let source = most_face_down(snapshot, kings, Tie::Leftmost)?;
        Some(Directive::move_run(source, target))
    }
}

/// Moves a whole face-up run onto another column to expose what lies below.
///
/// Sources with more face-down cards win, ties go right; the destination is
/// the leftmost column that accepts the run's root.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChainMove;

impl ChainMove {
    fn destination(snapshot: &Snapshot, source: usize) -> Option<usize> {
        let root = snapshot.root(source)?;
        (0..COLUMN_COUNT).find(|&col| {
            col != source
                && snapshot
                    .accessible(col)
                    .is_some_and(|target| root.stacks_on(target))
        })
    }
}

impl Proposer for ChainMove {
    fn name(&self) -> &'static str {
        "chain-move"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        let snapshot = ctx.snapshot;
        let movable =
            (0..COLUMN_COUNT).filter(|&col| Self::destination(snapshot, col).is_some());
        let source = most_face_down(snapshot, movable, Tie::Rightmost)?;
        let target = Self::destination(snapshot, source)?;
        Some(Directive::move_run(source, target))
    }
}

/// Splits a face-up run so a buried card becomes promotable.
///
/// The part of the run above the card moves elsewhere; the freed card with
/// the lowest rank wins, earlier columns first.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplitRunForFoundation;

impl Proposer for SplitRunForFoundation {
    fn name(&self) -> &'static str {
        "split-run-for-foundation"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        let snapshot = ctx.snapshot;
        let mut best: Option<(u8, Directive)> = None;
        for source in 0..COLUMN_COUNT {
            let run = snapshot.face_up(source);
            for offset in 1..run.len() {
                let freed = run[offset - 1];
                if !snapshot.promotable(freed) {
                    continue;
                }
                let moving = run[offset];
                let Some(target) = (0..COLUMN_COUNT)
                    .find(|&col| col != source && snapshot.accepts(col, moving))
                else {
                    continue;
                };
                if best.as_ref().is_none_or(|(rank, _)| freed.rank() < *rank) {
                    best = Some((
                        freed.rank(),
                        Directive::Move {
                            from: source,
                            to: target,
                            offset,
                        },
                    ));
                }
            }
        }
        best.map(|(_, directive)| directive)
    }
}
