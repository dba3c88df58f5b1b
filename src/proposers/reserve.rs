use crate::action::Directive;
use crate::card::{COLUMN_COUNT, Card};
use crate::chain::chain_exists;
use crate::proposer::{Context, Proposer};
use crate::proposers::{Tie, most_face_down};
use crate::state::{DrawMode, Snapshot};

/// Non-empty columns whose accessible card takes `card`, left to right.
fn stacking_targets(snapshot: &Snapshot, card: Card) -> impl Iterator<Item = usize> + '_ {
    (0..COLUMN_COUNT).filter(move |&col| {
        snapshot
            .accessible(col)
            .is_some_and(|target| card.stacks_on(target))
    })
}

/// Reserve King into the leftmost empty column.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReserveKing;

impl Proposer for ReserveKing {
    fn name(&self) -> &'static str {
        "reserve-king"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        let top = ctx.snapshot.reserve_top().filter(|card| card.is_king())?;
        let column = ctx.snapshot.empty_columns().next()?;
        Some(Directive::StockToBoard {
            column,
            note: Some(format!("{top} to empty column")),
        })
    }
}

/// Places the reserve top only when a second move follows at once.
///
/// Policy:
/// - The placement must be legal on a non-empty column.
/// - Afterwards another column's root must fit on the placed card, or in
///   triple-draw mode the next revealed reserve card must.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReserveWithFollowUp;

impl ReserveWithFollowUp {
    fn follow_up(ctx: &Context<'_>, top: Card, target: usize) -> Option<String> {
        let snapshot = ctx.snapshot;
        let roots = (0..COLUMN_COUNT).filter(|&col| {
            col != target && snapshot.root(col).is_some_and(|root| root.stacks_on(top))
        });
        if let Some(col) = most_face_down(snapshot, roots, Tie::Rightmost) {
            let root = snapshot.root(col)?;
            return Some(format!("frees {root} from column {col}"));
        }
        if ctx.mode() == DrawMode::Triple {
            if let Some(next) = snapshot.reserve[1].filter(|next| next.stacks_on(top)) {
                return Some(format!("makes room for {next}"));
            }
        }
        None
    }
}

impl Proposer for ReserveWithFollowUp {
    fn name(&self) -> &'static str {
        "reserve-with-follow-up"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        let top = ctx.snapshot.reserve_top()?;
        stacking_targets(ctx.snapshot, top).find_map(|column| {
            Self::follow_up(ctx, top, column).map(|note| Directive::StockToBoard {
                column,
                note: Some(note),
            })
        })
    }
}

/// Places the reserve top when known reserve cards can later bridge it down
/// to a root already showing on the board.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReserveChainLink;

impl Proposer for ReserveChainLink {
    fn name(&self) -> &'static str {
        "reserve-chain-link"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        let snapshot = ctx.snapshot;
        let top = snapshot.reserve_top()?;
        stacking_targets(snapshot, top).find_map(|column| {
            let (_, root) = (0..COLUMN_COUNT)
                .filter(|&col| col != column)
                .filter_map(|col| snapshot.root(col).map(|root| (col, root)))
                .find(|(_, root)| {
                    root.rank() + 1 < top.rank() && chain_exists(top, *root, ctx.tracker)
                })?;
            Some(Directive::StockToBoard {
                column,
                note: Some(format!("links {top} to {root} through the reserve")),
            })
        })
    }
}

/// Places the reserve top on the leftmost column that takes it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReserveAnywhere;

impl Proposer for ReserveAnywhere {
    fn name(&self) -> &'static str {
        "reserve-anywhere"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        let top = ctx.snapshot.reserve_top()?;
        (0..COLUMN_COUNT)
            .find(|&col| ctx.snapshot.accepts(col, top))
            .map(Directive::stock_to_board)
    }
}
