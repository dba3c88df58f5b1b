use crate::error::AdvisorError;
use crate::proposer::{Cascade, Proposer};
use crate::proposers::{
    AnyBoardToFoundation, AnyReserveToFoundation, BoardToFoundation, ChainMove, CycleForChain,
    CycleForFiller, CycleToLearn, KingRelocation, ReserveAnywhere, ReserveChainLink,
    ReserveKing, ReserveToFoundation, ReserveWithFollowUp, SplitRunForFoundation, Victory,
};

/// Proposer names in canonical priority order.
pub const CANONICAL_ORDER: [&str; 15] = [
    "victory",
    "board-to-foundation",
    "reserve-to-foundation",
    "king-relocation",
    "chain-move",
    "reserve-king",
    "reserve-with-follow-up",
    "reserve-chain-link",
    "cycle-for-filler",
    "cycle-for-chain",
    "cycle-to-learn",
    "reserve-anywhere",
    "any-board-to-foundation",
    "any-reserve-to-foundation",
    "split-run-for-foundation",
];

/// Create a proposer from its name.
pub fn create_proposer(name: &str) -> Option<Box<dyn Proposer>> {
    let proposer: Box<dyn Proposer> = match name.trim().to_ascii_lowercase().as_str() {
        "victory" => Box::new(Victory),
        "board-to-foundation" => Box::new(BoardToFoundation),
        "reserve-to-foundation" => Box::new(ReserveToFoundation),
        "king-relocation" => Box::new(KingRelocation),
        "chain-move" => Box::new(ChainMove),
        "reserve-king" => Box::new(ReserveKing),
        "reserve-with-follow-up" => Box::new(ReserveWithFollowUp),
        "reserve-chain-link" => Box::new(ReserveChainLink),
        "cycle-for-filler" => Box::new(CycleForFiller),
        "cycle-for-chain" => Box::new(CycleForChain),
        "cycle-to-learn" => Box::new(CycleToLearn),
        "reserve-anywhere" => Box::new(ReserveAnywhere),
        "any-board-to-foundation" => Box::new(AnyBoardToFoundation),
        "any-reserve-to-foundation" => Box::new(AnyReserveToFoundation),
        "split-run-for-foundation" => Box::new(SplitRunForFoundation),
        _ => return None,
    };
    Some(proposer)
}

/// Builds a cascade from names, failing on the first unknown one.
pub fn cascade_from_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<Cascade, AdvisorError> {
    names
        .into_iter()
        .map(|name| {
            create_proposer(name).ok_or_else(|| AdvisorError::UnknownProposer(name.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Cascade::new)
}

pub fn canonical_cascade() -> Cascade {
    Cascade::new(
        CANONICAL_ORDER
            .iter()
            .filter_map(|name| create_proposer(name))
            .collect(),
    )
}
