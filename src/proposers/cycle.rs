use crate::action::Directive;
use crate::card::{COLUMN_COUNT, Card, RESERVE_SIZE};
use crate::chain::bridge;
use crate::proposer::{Context, Proposer};
use crate::state::Snapshot;

/// (accessible card of one column, root of another column) pairs.
fn column_pairs(snapshot: &Snapshot) -> impl Iterator<Item = (Card, Card)> + '_ {
    (0..COLUMN_COUNT)
        .filter_map(|target| snapshot.accessible(target).map(|card| (target, card)))
        .flat_map(move |(target, upper)| {
            (0..COLUMN_COUNT)
                .filter(move |&source| source != target)
                .filter_map(move |source| snapshot.root(source))
                .map(move |lower| (upper, lower))
        })
}

fn join_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

/// Cycles while the single card that would join two columns is still unseen.
///
/// Fires for an accessible card two ranks above another column's root of the
/// same color, as long as part of the reserve is still unidentified.
#[derive(Clone, Copy, Debug, Default)]
pub struct CycleForFiller;

impl Proposer for CycleForFiller {
    fn name(&self) -> &'static str {
        "cycle-for-filler"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        if ctx.tracker.reserve_known() {
            return None;
        }
        column_pairs(ctx.snapshot).find_map(|(upper, lower)| {
            if upper.rank() != lower.rank() + 2 || upper.color() != lower.color() {
                return None;
            }
            let unseen: Vec<Card> = Card::of_color(upper.rank() - 1, upper.color().opposite())?
                .into_iter()
                .filter(|card| ctx.tracker.is_unseen(*card))
                .collect();
            (!unseen.is_empty()).then(|| {
                Directive::cycle_with(format!(
                    "searching for {} to join {upper} and {lower}",
                    join_cards(&unseen)
                ))
            })
        })
    }

    fn speculative(&self) -> bool {
        true
    }
}

/// Cycles toward reserve cards that provably bridge two columns.
#[derive(Clone, Copy, Debug, Default)]
pub struct CycleForChain;

impl Proposer for CycleForChain {
    fn name(&self) -> &'static str {
        "cycle-for-chain"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        column_pairs(ctx.snapshot).find_map(|(upper, lower)| {
            if upper.rank() < lower.rank() + 2 {
                return None;
            }
            let links = bridge(upper, lower, ctx.tracker)?;
            let fillers = links
                .iter()
                .map(|link| join_cards(&link.candidates))
                .collect::<Vec<_>>()
                .join(", ");
            Some(Directive::cycle_with(format!(
                "chain {upper} to {lower} via {fillers}"
            )))
        })
    }

    fn speculative(&self) -> bool {
        true
    }
}

/// Cycles until every reserve card has been identified.
#[derive(Clone, Copy, Debug, Default)]
pub struct CycleToLearn;

impl Proposer for CycleToLearn {
    fn name(&self) -> &'static str {
        "cycle-to-learn"
    }

    fn propose(&self, ctx: &Context<'_>) -> Option<Directive> {
        let seen = ctx.tracker.seen_reserve_count();
        (seen < RESERVE_SIZE).then(|| {
            Directive::cycle_with(format!("learning the reserve, {seen}/{RESERVE_SIZE} seen"))
        })
    }

    fn speculative(&self) -> bool {
        true
    }
}
