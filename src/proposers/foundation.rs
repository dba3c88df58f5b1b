use crate::action::Directive;
use crate::card::COLUMN_COUNT;
use crate::proposer::{Context, Proposer};
use crate::proposers::{Tie, most_face_down};

/// Every foundation holds its King: the deal is over.
#[derive(Clone, Copy, Debug, Default)]
pub struct Victory;

impl Proposer for Victory {
    fn name(&self) -> &'static str {
        "victory"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        ctx.snapshot
            .is_complete()
            .then(|| Directive::reset_with("deal complete"))
    }
}

/// Safe board promotion.
///
/// Policy:
/// - Only cards ranked one above the lowest foundation qualify, so no card
///   still needed as a tableau anchor is banked early.
/// - Prefer the column hiding the most face-down cards; ties go right.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoardToFoundation;

impl Proposer for BoardToFoundation {
    fn name(&self) -> &'static str {
        "board-to-foundation"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        let snapshot = ctx.snapshot;
        let candidates = (0..COLUMN_COUNT).filter(|&col| {
            snapshot
                .accessible(col)
                .is_some_and(|card| snapshot.safely_promotable(card))
        });
        most_face_down(snapshot, candidates, Tie::Rightmost)
            .map(|column| Directive::BoardToFoundation { column })
    }
}

/// Safe reserve promotion, same rank rule as [`BoardToFoundation`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ReserveToFoundation;

impl Proposer for ReserveToFoundation {
    fn name(&self) -> &'static str {
        "reserve-to-foundation"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        let top = ctx.snapshot.reserve_top()?;
        ctx.snapshot
            .safely_promotable(top)
            .then_some(Directive::StockToFoundation)
    }
}

/// Any legal board promotion, lowest rank first.
///
/// Ties on rank go to the column with more face-down cards, then rightmost.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyBoardToFoundation;

impl Proposer for AnyBoardToFoundation {
    fn name(&self) -> &'static str {
        "any-board-to-foundation"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        let snapshot = ctx.snapshot;
        let promotable: Vec<(usize, u8)> = (0..COLUMN_COUNT)
            .filter_map(|col| {
                let card = snapshot.accessible(col)?;
                snapshot.promotable(card).then_some((col, card.rank()))
            })
            .collect();
        let lowest = promotable.iter().map(|(_, rank)| *rank).min()?;
        let candidates = promotable
            .iter()
            .filter(|(_, rank)| *rank == lowest)
            .map(|(col, _)| *col);
        most_face_down(snapshot, candidates, Tie::Rightmost)
            .map(|column| Directive::BoardToFoundation { column })
    }
}

/// Any legal reserve promotion.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyReserveToFoundation;

impl Proposer for AnyReserveToFoundation {
    fn name(&self) -> &'static str {
        "any-reserve-to-foundation"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        let top = ctx.snapshot.reserve_top()?;
        ctx.snapshot
            .promotable(top)
            .then_some(Directive::StockToFoundation)
    }
}
