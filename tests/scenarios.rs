//! End-to-end match scenarios and properties over the public API.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use hand_cricket::game::{
    BallOutcome, BattingChoice, CoinFace, GameEventData, GameMode, Innings, Margin, MatchController,
    MatchPhase, PlayerNames, Side, TeamCatalog, Winner,
};
use hand_cricket::{MatchError, ScriptedRandom, MAX_WICKETS};

/// Controller whose coin always lands heads.
fn heads_controller() -> MatchController<ScriptedRandom> {
    MatchController::new(TeamCatalog::default(), ScriptedRandom::with_coins(vec![true]))
}

fn configure_default(c: &mut MatchController<ScriptedRandom>) {
    c.configure(
        GameMode::VsComputer,
        Some("India"),
        Some("Australia"),
        PlayerNames::for_mode(GameMode::VsComputer),
    )
    .unwrap();
}

/// Player 1 wins the toss and takes the given choice.
fn started(choice: BattingChoice) -> MatchController<ScriptedRandom> {
    let mut c = heads_controller();
    configure_default(&mut c);
    c.perform_toss(CoinFace::Heads).unwrap();
    c.choose_batting_order(choice).unwrap();
    c
}

fn all_out(c: &mut MatchController<ScriptedRandom>) {
    while !c.check_innings_end().unwrap() {
        c.resolve_ball(2, 2).unwrap();
    }
}

#[test]
fn test_first_innings_walkthrough() {
    let mut c = heads_controller();
    configure_default(&mut c);

    let toss = c.perform_toss(CoinFace::Heads).unwrap();
    assert_eq!(toss.coin, CoinFace::Heads);
    assert_eq!(toss.winner, Side::Player1);

    let order = c.choose_batting_order(BattingChoice::Bat).unwrap();
    assert_eq!(order.batting_first, Side::Player1);

    let ball = c.resolve_ball(4, 2).unwrap();
    assert_eq!(ball.outcome, BallOutcome::Four);
    let first = c.state().first_innings.clone().unwrap();
    assert_eq!((first.runs, first.wickets), (4, 0));
    assert_eq!(first.batsman_runs(0), Some(4));

    c.resolve_ball(3, 3).unwrap();
    let first = c.state().first_innings.clone().unwrap();
    assert_eq!(first.wickets, 1);
    assert_eq!(first.current_batsman(), 1);

    for x in 1..=9 {
        assert_eq!(c.check_innings_end(), Ok(false));
        c.resolve_ball(x % 6 + 1, x % 6 + 1).unwrap();
    }
    assert_eq!(c.state().first_innings.as_ref().unwrap().wickets, 10);
    assert_eq!(c.check_innings_end(), Ok(true));

    let state = c.advance_innings().unwrap();
    assert_eq!(state.phase, MatchPhase::InningsInProgress(Innings::Second));
    assert_eq!(state.target(), Some(4));
    assert_eq!(state.second_innings.as_ref().unwrap().display_target(), Some(5));
    assert_eq!(c.batting_side(), Some(Side::Player2));
}

#[test]
fn test_ten_dismissals_stop_at_ten() {
    let mut c = started(BattingChoice::Bat);

    for n in 0..MAX_WICKETS {
        assert_eq!(c.check_innings_end(), Ok(false), "ended early after {} wickets", n);
        c.resolve_ball(6, 6).unwrap();
    }
    assert_eq!(c.check_innings_end(), Ok(true));

    // An eleventh dismissal is refused
    assert!(matches!(c.resolve_ball(6, 6), Err(MatchError::IllegalTransition { .. })));
    let first = c.state().first_innings.as_ref().unwrap();
    assert_eq!(first.wickets, 10);
    assert_eq!(first.current_batsman(), 10);
}

#[test]
fn test_chase_ends_on_the_winning_ball() {
    let mut c = started(BattingChoice::Bat);

    c.resolve_ball(6, 1).unwrap();
    c.resolve_ball(4, 1).unwrap();
    all_out(&mut c);
    c.advance_innings().unwrap();
    assert_eq!(c.state().target(), Some(10));

    c.resolve_ball(5, 1).unwrap();
    c.resolve_ball(5, 2).unwrap();
    assert_eq!(c.check_innings_end(), Ok(false), "level scores do not end the chase");

    let ball = c.resolve_ball(1, 6).unwrap();
    assert!(ball.innings_over);
    assert_eq!(c.check_innings_end(), Ok(true));
    assert!(matches!(c.resolve_ball(3, 4), Err(MatchError::IllegalTransition { .. })));
    assert_eq!(c.state().second_innings.as_ref().unwrap().runs, 11);

    let state = c.advance_innings().unwrap();
    let outcome = state.outcome.unwrap();
    assert_eq!(outcome.winner, Winner::Side(Side::Player2));
    assert_eq!(outcome.margin, Some(Margin::Wickets(10)));
    assert_eq!(format!("{}", Margin::Wickets(10)), "by 10 wickets");
}

#[test]
fn test_defended_total_and_tie() {
    // Defended: 7 against 3
    let mut c = started(BattingChoice::Bat);
    c.resolve_ball(3, 1).unwrap();
    c.resolve_ball(4, 1).unwrap();
    all_out(&mut c);
    c.advance_innings().unwrap();
    c.resolve_ball(3, 1).unwrap();
    all_out(&mut c);
    let outcome = c.advance_innings().unwrap().outcome.unwrap();
    assert_eq!(outcome.winner, Winner::Side(Side::Player1));
    assert_eq!(outcome.margin, Some(Margin::Runs(4)));

    // Tie: 5 each
    let mut c = started(BattingChoice::Bowl);
    c.resolve_ball(5, 1).unwrap();
    all_out(&mut c);
    c.advance_innings().unwrap();
    c.resolve_ball(5, 1).unwrap();
    all_out(&mut c);
    let state = c.advance_innings().unwrap();
    assert_eq!(state.winner(), Some(Winner::Tie));
    assert_eq!(state.score(Side::Player1), state.score(Side::Player2));
}

#[test]
fn test_reset_then_configure_round_trip() {
    let mut c = heads_controller();
    configure_default(&mut c);
    let fresh_state = c.state().clone();
    let fresh_events = c.take_events();

    c.perform_toss(CoinFace::Heads).unwrap();
    c.choose_batting_order(BattingChoice::Bat).unwrap();
    c.resolve_ball(6, 2).unwrap();
    c.resolve_ball(4, 4).unwrap();

    c.reset();
    assert_eq!(c.phase(), MatchPhase::Unconfigured);
    configure_default(&mut c);

    assert_eq!(c.state(), &fresh_state);
    assert_eq!(c.take_events(), fresh_events);
    assert_eq!(c.state().score(Side::Player1), 0);
    assert_eq!(c.state().deliveries, 0);
}

#[test]
fn test_operations_out_of_order() {
    let mut c = heads_controller();

    assert!(matches!(c.perform_toss(CoinFace::Heads), Err(MatchError::IllegalTransition { .. })));
    assert!(matches!(c.choose_batting_order(BattingChoice::Bat), Err(MatchError::IllegalTransition { .. })));
    assert!(matches!(c.resolve_ball(1, 2), Err(MatchError::IllegalTransition { .. })));
    assert!(matches!(c.advance_innings(), Err(MatchError::IllegalTransition { .. })));
    assert!(matches!(c.check_innings_end(), Err(MatchError::IllegalTransition { .. })));
    assert_eq!(c.phase(), MatchPhase::Unconfigured);

    configure_default(&mut c);
    assert!(matches!(c.choose_batting_order(BattingChoice::Bat), Err(MatchError::IllegalTransition { .. })));
}

#[test]
fn test_batsman_index_monotonic_over_random_matches() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for _ in 0..50 {
        let mut c = started(if rng.gen() { BattingChoice::Bat } else { BattingChoice::Bowl });

        while !c.state().is_complete() {
            if c.check_innings_end().unwrap() {
                c.advance_innings().unwrap();
                continue;
            }
            let before = c.state().current().unwrap().current_batsman();
            c.resolve_ball(rng.gen_range(1..=6), rng.gen_range(1..=6)).unwrap();

            let after = c.state().current().map(|i| i.current_batsman()).unwrap();
            assert!(after >= before);
            assert!(after <= 10);
        }

        let events = c.take_events();
        assert!(matches!(events.last().map(|e| &e.data), Some(GameEventData::PhaseChanged {
            new_phase: MatchPhase::Complete,
            ..
        })));
    }
}

proptest! {
    /// Property: a ball adds exactly one wicket or exactly `offense` runs, never both
    #[test]
    fn prop_ball_resolution(offense in 1i32..=6, defense in 1i32..=6) {
        let mut c = started(BattingChoice::Bat);
        c.resolve_ball(1, 2).unwrap();
        let before = c.state().first_innings.clone().unwrap();

        c.resolve_ball(offense, defense).unwrap();
        let after = c.state().first_innings.clone().unwrap();

        if offense == defense {
            prop_assert_eq!(after.wickets, before.wickets + 1);
            prop_assert_eq!(after.runs, before.runs);
        } else {
            prop_assert_eq!(after.wickets, before.wickets);
            prop_assert_eq!(after.runs, before.runs + offense as u32);
        }
    }

    /// Property: numbers outside 1..=6 are rejected without touching state
    #[test]
    fn prop_out_of_range_rejected(bad in prop_oneof![i32::MIN..1, 7..i32::MAX], good in 1i32..=6) {
        let mut c = started(BattingChoice::Bat);
        let before = c.state().clone();

        prop_assert_eq!(c.resolve_ball(bad, good), Err(MatchError::InvalidInput { value: bad }));
        prop_assert_eq!(c.resolve_ball(good, bad), Err(MatchError::InvalidInput { value: bad }));
        prop_assert_eq!(c.state(), &before);
    }

    /// Property: check_innings_end is stable between mutations
    #[test]
    fn prop_check_innings_end_idempotent(balls in prop::collection::vec((1i32..=6, 1i32..=6), 0..40)) {
        let mut c = started(BattingChoice::Bat);
        for (o, d) in balls {
            if c.check_innings_end().unwrap() {
                break;
            }
            c.resolve_ball(o, d).unwrap();
        }

        let first = c.check_innings_end();
        for _ in 0..3 {
            prop_assert_eq!(c.check_innings_end(), first.clone());
        }
    }

    /// Property: batsman index never decreases and stays within the lineup
    #[test]
    fn prop_batsman_index_bounded(balls in prop::collection::vec((1i32..=6, 1i32..=6), 1..60)) {
        let mut c = started(BattingChoice::Bat);
        let mut last = 0;
        for (o, d) in balls {
            if c.check_innings_end().unwrap() {
                break;
            }
            c.resolve_ball(o, d).unwrap();
            let index = c.state().first_innings.as_ref().unwrap().current_batsman();
            prop_assert!(index >= last);
            prop_assert!(index <= 10);
            last = index;
        }
    }
}
