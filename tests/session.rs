use std::error::Error;

use klondike_advisor::{
    Advisor, Directive, DrawMode, Knowledge, KnowledgeTracker, Snapshot, Solitaire, Table,
    card::full_deck,
};

const MOVE_CAP: usize = 20_000;

type TestResult = Result<(), Box<dyn Error>>;

/// Plays one deal on autopilot, handing every advised directive and the
/// tracker state after it to `inspect`. Returns the directives up to and
/// including the final reset.
fn autoplay(
    table: &mut Table,
    mut inspect: impl FnMut(&Snapshot, &KnowledgeTracker),
) -> Result<Vec<Directive>, Box<dyn Error>> {
    let mut advisor = Advisor::new();
    advisor.bind_to(&*table);
    let mode = table.draw_mode();
    let mut played = Vec::new();
    while played.len() < MOVE_CAP {
        let snapshot = Snapshot::observe(&*table, mode);
        let directive = advisor.advise_snapshot(&snapshot)?;
        inspect(&snapshot, advisor.tracker().ok_or("advisor lost its binding")?);
        played.push(directive.clone());
        if directive.is_reset() {
            return Ok(played);
        }
        table.apply(&directive)?;
    }
    Err(format!("deal did not finish within {MOVE_CAP} directives").into())
}

fn stage(knowledge: Knowledge) -> u8 {
    match knowledge {
        Knowledge::Unseen => 0,
        Knowledge::InReserve(_) => 1,
        Knowledge::InPlay => 2,
    }
}

#[test]
fn every_deal_ends_in_a_reset() -> TestResult {
    for (seed, mode) in [
        (1, DrawMode::Single),
        (2, DrawMode::Single),
        (3, DrawMode::Triple),
        (4, DrawMode::Triple),
    ] {
        let mut table = Table::builder()
            .with_seed(seed)
            .with_draw_mode(mode)
            .build()?;
        let played = autoplay(&mut table, |_, _| {})?;
        let last = played.last().ok_or("no directives")?;
        assert!(last.is_reset());
        // Only the final directive resets.
        assert!(played[..played.len() - 1].iter().all(|d| !d.is_reset()));
    }
    Ok(())
}

#[test]
fn every_deal_terminates_across_many_seeds() -> TestResult {
    for mode in [DrawMode::Single, DrawMode::Triple] {
        for seed in 0..200 {
            let mut table = Table::builder()
                .with_seed(seed)
                .with_draw_mode(mode)
                .build()?;
            let played = autoplay(&mut table, |_, _| {})
                .map_err(|err| format!("seed {seed} in {mode:?}: {err}"))?;
            assert!(played.last().is_some_and(Directive::is_reset));
        }
    }
    Ok(())
}

#[test]
fn knowledge_stays_partitioned_and_only_advances() -> TestResult {
    for mode in [DrawMode::Single, DrawMode::Triple] {
        let mut table = Table::builder()
            .with_seed(0xC0FFEE)
            .with_draw_mode(mode)
            .build()?;
        let mut previous: Option<KnowledgeTracker> = None;
        autoplay(&mut table, |snapshot, tracker| {
            let unseen = tracker.missing().len();
            let reserve = tracker.in_reserve().len();
            let in_play = tracker.in_play().len();
            assert_eq!(unseen + reserve + in_play, 52);
            assert!(tracker.seen_reserve_count() <= 24);

            for card in snapshot.visible_cards() {
                assert!(tracker.is_in_play(card), "{card} visible but not in play");
            }
            if let Some(prev) = &previous {
                assert!(tracker.seen_reserve_count() >= prev.seen_reserve_count());
                for card in full_deck() {
                    assert!(
                        stage(tracker.knowledge(card)) >= stage(prev.knowledge(card)),
                        "{card} moved backwards"
                    );
                }
            }
            previous = Some(tracker.clone());
        })?;
    }
    Ok(())
}

#[test]
fn identical_deals_get_identical_advice() -> TestResult {
    let play = || -> Result<Vec<Directive>, Box<dyn Error>> {
        let mut table = Table::builder()
            .with_seed(77)
            .with_draw_mode(DrawMode::Triple)
            .build()?;
        autoplay(&mut table, |_, _| {})
    };
    assert_eq!(play()?, play()?);
    Ok(())
}
