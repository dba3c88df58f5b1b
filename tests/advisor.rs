use klondike_advisor::{
    Advisor, AdvisorConfig, AdvisorError, Card, Directive, DrawMode, Progress, Slot, Snapshot,
    Suit, cascade_from_names,
};

fn card(text: &str) -> Card {
    text.parse().expect("valid card")
}

fn up(text: &str) -> Slot {
    Slot::Up(card(text))
}

fn bound(mode: DrawMode) -> Advisor {
    let mut advisor = Advisor::new().with_config(AdvisorConfig {
        validate_snapshots: true,
    });
    advisor.bind(mode);
    advisor
}

fn foundations_at(rank: u8) -> [Option<Card>; 4] {
    Suit::ALL.map(|suit| Card::new(rank, suit))
}

#[test]
fn accessible_ace_goes_home() -> Result<(), AdvisorError> {
    let mut snapshot = Snapshot::empty();
    snapshot.columns[0] = vec![up("9D")];
    snapshot.columns[2] = vec![Slot::FaceDown, Slot::FaceDown, up("AS")];
    let mut advisor = bound(DrawMode::Single);
    let directive = advisor.advise_snapshot(&snapshot)?;
    assert_eq!(directive, Directive::BoardToFoundation { column: 2 });
    assert_eq!(directive.to_string(), "btf 2");
    Ok(())
}

#[test]
fn safe_promotion_prefers_deeper_column() -> Result<(), AdvisorError> {
    let mut snapshot = Snapshot::empty();
    snapshot.foundations = foundations_at(5);
    snapshot.columns[1] = vec![Slot::FaceDown, Slot::FaceDown, Slot::FaceDown, up("6S")];
    snapshot.columns[4] = vec![up("6H")];
    let mut advisor = bound(DrawMode::Single);
    assert_eq!(
        advisor.advise_snapshot(&snapshot)?,
        Directive::BoardToFoundation { column: 1 }
    );
    Ok(())
}

#[test]
fn uneven_foundations_leave_promotion_to_the_relaxed_rule() -> Result<(), AdvisorError> {
    let mut snapshot = Snapshot::empty();
    snapshot.foundations = [Some(card("5S")), Some(card("5H")), None, None];
    snapshot.columns[1] = vec![Slot::FaceDown, Slot::FaceDown, Slot::FaceDown, up("6S")];
    snapshot.columns[4] = vec![up("6H")];

    // Clubs and diamonds are still empty, so neither six is safe to bank.
    let advisor = bound(DrawMode::Single);
    let proposal = advisor.propose(&snapshot)?.expect("a proposal");
    assert_ne!(proposal.proposer, "board-to-foundation");
    assert!(proposal.speculative);
    assert!(proposal.directive.is_cycle());
    assert_ne!(proposal.directive, Directive::BoardToFoundation { column: 1 });
    assert_ne!(proposal.directive, Directive::BoardToFoundation { column: 4 });

    let mut advisor = Advisor::with_cascade(cascade_from_names([
        "board-to-foundation",
        "any-board-to-foundation",
    ])?)
    .with_config(AdvisorConfig {
        validate_snapshots: true,
    });
    advisor.bind(DrawMode::Single);
    let proposal = advisor.propose(&snapshot)?.expect("a proposal");
    assert_eq!(proposal.proposer, "any-board-to-foundation");
    assert_eq!(proposal.directive, Directive::BoardToFoundation { column: 1 });
    Ok(())
}

#[test]
fn complete_foundations_reset_the_deal() -> Result<(), AdvisorError> {
    let mut snapshot = Snapshot::empty();
    snapshot.foundations = foundations_at(13);
    let mut advisor = bound(DrawMode::Triple);
    let directive = advisor.advise_snapshot(&snapshot)?;
    assert!(directive.is_reset());
    assert_eq!(directive.to_string(), "reset (deal complete)");
    Ok(())
}

#[test]
fn board_promotion_outranks_reserve_promotion() -> Result<(), AdvisorError> {
    let mut snapshot = Snapshot::empty();
    snapshot.columns[0] = vec![up("AS")];
    snapshot.reserve[0] = Some(card("AH"));
    let mut advisor = bound(DrawMode::Single);
    assert_eq!(
        advisor.advise_snapshot(&snapshot)?,
        Directive::BoardToFoundation { column: 0 }
    );
    Ok(())
}

#[test]
fn unbound_advisor_refuses_to_advise() {
    let mut advisor = Advisor::new();
    assert_eq!(
        advisor.advise_snapshot(&Snapshot::empty()),
        Err(AdvisorError::NotBound)
    );
    assert!(matches!(
        advisor.propose(&Snapshot::empty()),
        Err(AdvisorError::NotBound)
    ));

    advisor.bind(DrawMode::Single);
    assert!(advisor.is_bound());
    advisor.unbind();
    assert_eq!(
        advisor.advise_snapshot(&Snapshot::empty()),
        Err(AdvisorError::NotBound)
    );
}

#[test]
fn duplicated_card_is_rejected_when_validating() {
    let mut snapshot = Snapshot::empty();
    snapshot.columns[0] = vec![up("7C")];
    snapshot.columns[3] = vec![up("7C")];
    let mut advisor = bound(DrawMode::Single);
    assert_eq!(
        advisor.advise_snapshot(&snapshot),
        Err(AdvisorError::Malformed(card("7C")))
    );
}

#[test]
fn exhausted_reserve_gives_up_and_stays_given_up() -> Result<(), AdvisorError> {
    // Queens banked and the four kings buried: no stock or waste left.
    let mut snapshot = Snapshot::empty();
    snapshot.foundations = foundations_at(12);
    snapshot.columns[0] = vec![Slot::FaceDown; 4];
    assert_eq!(snapshot.reserve_len(), 0);
    let mut advisor = bound(DrawMode::Single);

    assert!(advisor.advise_snapshot(&snapshot)?.is_cycle());
    assert_eq!(advisor.progress(), Some(Progress::Stumped));

    assert!(advisor.advise_snapshot(&snapshot)?.is_reset());
    assert_eq!(advisor.progress(), Some(Progress::GaveUp));

    assert!(advisor.advise_snapshot(&snapshot)?.is_reset());

    advisor.bind(DrawMode::Single);
    assert_eq!(advisor.progress(), Some(Progress::Normal));
    Ok(())
}

#[test]
fn propose_leaves_knowledge_untouched() -> Result<(), AdvisorError> {
    let mut snapshot = Snapshot::empty();
    snapshot.columns[0] = vec![up("AS")];
    snapshot.reserve[0] = Some(card("4D"));
    let advisor = bound(DrawMode::Single);
    let proposal = advisor.propose(&snapshot)?.expect("a proposal");
    assert_eq!(proposal.proposer, "board-to-foundation");
    assert!(!proposal.speculative);

    let tracker = advisor.tracker().expect("bound");
    assert_eq!(tracker.missing().len(), 52);
    assert_eq!(tracker.seen_reserve_count(), 0);
    Ok(())
}

#[test]
fn reserve_cards_are_learned_in_exposure_order() -> Result<(), AdvisorError> {
    let mut snapshot = Snapshot::empty();
    snapshot.columns[0] = vec![Slot::FaceDown, up("2C")];
    snapshot.reserve = [Some(card("9H")), Some(card("4S")), Some(card("JD"))];
    let mut advisor = bound(DrawMode::Triple);
    advisor.advise_snapshot(&snapshot)?;

    let tracker = advisor.tracker().expect("bound");
    assert_eq!(tracker.in_reserve(), vec![card("JD"), card("4S"), card("9H")]);
    assert_eq!(tracker.seen_reserve_count(), 3);
    assert!(tracker.is_in_play(card("2C")));
    Ok(())
}
