//! Integration tests for the roll engine and session driver.

use craps_sim::core::{Bet, Configuration, DiceRng, GameState, LimitReached, NumberBet, PointNumber, ScriptedDice};
use craps_sim::engine::{execute_single_roll, BetKind, BetOutcome, PlacedBet, ResolvedBet};
use craps_sim::session::Session;
use craps_sim::strategy::{OddsStrategy, PressStrategy, Rounding};

fn start(config: Configuration) -> GameState {
    GameState::init(config).unwrap()
}

// =============================================================================
// Line Bets
// =============================================================================

#[test]
fn test_come_out_natural_pays_pass_line() {
    let state = start(Configuration::default());
    let mut dice = ScriptedDice::from_totals(&[11]);

    let result = execute_single_roll(&state, &mut dice);

    assert_eq!(result.resolved_bets.len(), 1);
    assert_eq!(result.resolved_bets[0].outcome, BetOutcome::Win);
    assert_eq!(result.resolved_bets[0].payout, 15.0);
    assert_eq!(result.resulting_state.bankroll - result.placed_bet_state.bankroll, 30.0);
    assert_eq!(result.bankroll_delta(), 15.0);
    assert!(!result.resulting_state.point_is_on());
}

#[test]
fn test_come_out_craps_loses_pass_line() {
    let state = start(Configuration::default());
    let mut dice = ScriptedDice::from_totals(&[3]);

    let result = execute_single_roll(&state, &mut dice);

    assert_eq!(result.resolved_bets[0].outcome, BetOutcome::Loss);
    assert_eq!(result.resulting_state.bankroll, 285.0);
    assert!(result.resulting_state.current_bets.is_empty());
}

#[test]
fn test_seven_out_takes_flat_and_odds() {
    let config = Configuration::default().with_pass_bet_odds_strategy(OddsStrategy::SetAmount(25.0));
    let mut state = start(config);
    state.point = Some(PointNumber::Six);
    state.current_bets.pass_line_bet = Some(Bet { amount: 15.0, odds: Some(25.0) });
    state.bankroll = 260.0;

    let mut dice = ScriptedDice::from_totals(&[7]);
    let result = execute_single_roll(&state, &mut dice);

    assert!(result.new_bets.is_empty());
    assert_eq!(
        result.resolved_bets,
        vec![
            ResolvedBet::loss(PlacedBet::new(BetKind::PassLine, 15.0)),
            ResolvedBet::loss(PlacedBet::new(BetKind::PassLineOdds, 25.0)),
        ]
    );
    assert_eq!(result.resulting_state.bankroll, 260.0);
    assert_eq!(result.bankroll_delta(), 0.0);
    assert_eq!(result.resulting_state.point, None);
}

#[test]
fn test_point_cycle_with_table_max_odds() {
    let config = Configuration::default().with_pass_bet_odds_strategy(OddsStrategy::TableMax);
    let state = start(config);
    let mut dice = ScriptedDice::from_totals(&[5, 9, 5]);

    // Point of 5: 4x odds on $15 is $60.
    let first = execute_single_roll(&state, &mut dice);
    assert_eq!(first.resulting_state.point, Some(PointNumber::Five));

    let second = execute_single_roll(&first.resulting_state, &mut dice);
    assert_eq!(second.new_bets, vec![PlacedBet::new(BetKind::PassLineOdds, 60.0)]);
    assert!(second.resolved_bets.is_empty());

    let third = execute_single_roll(&second.resulting_state, &mut dice);
    assert!(third.new_bets.is_empty());
    assert_eq!(third.resolved_bets[1].payout, 90.0);
    // 300 - 15 - 60 + 30 + 150
    assert_eq!(third.resulting_state.bankroll, 405.0);
    assert_eq!(third.resulting_state.roll_num, 3);
}

#[test]
fn test_dont_pass_lay_odds_cycle() {
    let config = Configuration::default()
        .with_pass_bet(None)
        .with_dont_pass_bet(Some(10.0))
        .with_dont_pass_bet_odds_strategy(OddsStrategy::TableMax);
    let state = start(config);
    let mut dice = ScriptedDice::from_totals(&[4, 8, 7]);

    let first = execute_single_roll(&state, &mut dice);
    assert_eq!(first.resulting_state.point, Some(PointNumber::Four));

    let second = execute_single_roll(&first.resulting_state, &mut dice);
    assert_eq!(second.new_bets, vec![PlacedBet::new(BetKind::DontPassOdds, 60.0)]);

    let third = execute_single_roll(&second.resulting_state, &mut dice);
    assert_eq!(third.resolved_bets[0].outcome, BetOutcome::Win);
    assert_eq!(third.resolved_bets[1].payout, 30.0);
    assert_eq!(third.resulting_state.bankroll, 340.0);
}

// =============================================================================
// Number Bets
// =============================================================================

#[test]
fn test_buy_four_pays_thirty_nine() {
    let config = Configuration::default().with_number_bet(PointNumber::Four, Some(20.0));
    let mut state = start(config);
    state.point = Some(PointNumber::Nine);
    state.current_bets.number_bets.push_back(NumberBet::new(PointNumber::Four, 20.0));

    let mut dice = ScriptedDice::from_totals(&[4]);
    let result = execute_single_roll(&state, &mut dice);

    let win = result
        .resolved_bets
        .iter()
        .find(|r| r.bet.kind == BetKind::Number(PointNumber::Four))
        .unwrap();
    assert_eq!(win.outcome, BetOutcome::Win);
    assert_eq!(win.payout, 39.0);

    let bet = result.resulting_state.current_bets.number_bet(PointNumber::Four).unwrap();
    assert_eq!(bet.wager, 20.0);
    assert_eq!(bet.consecutive_win_count, 1);
}

#[test]
fn test_place_six_in_cents() {
    let config = Configuration::default()
        .with_rounding(Rounding::Cent)
        .with_avoid_rounding(false)
        .with_number_bet(PointNumber::Six, Some(25.0));
    let mut state = start(config);
    state.point = Some(PointNumber::Five);

    let mut dice = ScriptedDice::from_totals(&[6]);
    let result = execute_single_roll(&state, &mut dice);

    assert_eq!(result.new_bets, vec![PlacedBet::new(BetKind::Number(PointNumber::Six), 25.0)]);
    assert_eq!(result.resolved_bets[0].payout, 29.17);
}

#[test]
fn test_press_limit_cashes_out_until_next_come_out() {
    let config = Configuration::default()
        .with_number_bet(PointNumber::Eight, Some(12.0))
        .with_press_strategy(PressStrategy::FullPress)
        .with_press_limit(Some(1));
    let state = start(config);
    // Point 5, eight hits (cashed out), eight again (no bet), point made,
    // then the next cycle puts the eight back up.
    let mut dice = ScriptedDice::from_totals(&[5, 8, 8, 5, 9, 3]);

    let results: Vec<_> = std::iter::successors(Some(execute_single_roll(&state, &mut dice)), |prev| {
        (prev.resulting_state.roll_num < 6).then(|| execute_single_roll(&prev.resulting_state, &mut dice))
    })
    .collect();

    assert_eq!(results[0].new_bets.len(), 1);
    assert_eq!(results[1].new_bets, vec![PlacedBet::new(BetKind::Number(PointNumber::Eight), 12.0)]);
    assert_eq!(results[1].resolved_bets[0].credited, 12.0 + 14.0);
    assert_eq!(results[1].resulting_state.cashed_out_numbers.as_slice(), &[PointNumber::Eight]);

    assert!(results[2].new_bets.is_empty());
    assert!(results[2].resolved_bets.is_empty());

    // Come-out after the point is made clears the list.
    assert!(results[4].placed_bet_state.cashed_out_numbers.is_empty());
    assert_eq!(results[4].resulting_state.point, Some(PointNumber::Nine));
    assert!(results[5]
        .new_bets
        .contains(&PlacedBet::new(BetKind::Number(PointNumber::Eight), 12.0)));
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn test_session_plays_out_working_bets_past_limit() {
    let config = Configuration::default()
        .with_maximum_rolls(Some(1))
        .with_come_bet(Some(10.0));
    let dice = ScriptedDice::from_totals(&[6, 4, 6, 7, 2]);

    let history = Session::new(config, dice).unwrap().play_out();

    // Roll limit reached on the first roll, but the pass line rides until the
    // six repeats; nothing new is placed in the meantime.
    assert_eq!(history.len(), 3);
    assert!(history[1..].iter().all(|r| r.new_bets.is_empty()));
    let last = &history[2].resulting_state;
    assert!(last.is_done());
    assert_eq!(last.limit_reached(), Some(LimitReached::MaxRolls));
    assert_eq!(last.bankroll, 315.0);
}

#[test]
fn test_busted_session() {
    let config = Configuration::default()
        .with_initial_bankroll(Some(30.0))
        .with_bankroll_minimum(None)
        .with_bankroll_maximum(None)
        .with_maximum_rolls(None);
    let dice = ScriptedDice::from_totals(&[2]);

    let end = Session::new(config, dice).unwrap().run_to_completion();
    assert_eq!(end.roll_num, 2);
    assert_eq!(end.bankroll, 0.0);
    assert_eq!(end.limit_reached(), Some(LimitReached::Busted));
}

#[test]
fn test_session_ends_when_rounded_number_bet_no_longer_fits() {
    let config = Configuration::default()
        .with_pass_bet(None)
        .with_maximum_rolls(None)
        .with_number_bet(PointNumber::Six, Some(10.0));
    let state = GameState {
        bankroll: 61.0,
        ..start(config)
    };

    let mut session = Session::from_state(state, DiceRng::new(1));
    assert!(session.is_done());
    assert_eq!(session.state().limit_reached(), Some(LimitReached::BankrollMin));
    assert!(session.next().is_none());
}

#[test]
fn test_number_bet_only_sessions_finish_without_roll_limit() {
    // $12 on the four is placed as $15.
    let config = Configuration::default()
        .with_initial_bankroll(Some(75.0))
        .with_pass_bet(None)
        .with_maximum_rolls(None)
        .with_number_bet(PointNumber::Four, Some(12.0));

    for seed in 0..20 {
        let history = Session::seeded(config.clone(), seed).unwrap().take(100_000).collect::<Vec<_>>();
        let last = &history[history.len() - 1].resulting_state;
        assert!(last.is_done(), "seed {seed} still running at ${}", last.bankroll);
        assert!(history.len() < 100_000);
    }
}

#[test]
fn test_session_iterator_counts_rolls() {
    let session = Session::seeded(Configuration::default().with_maximum_rolls(Some(25)), 2024).unwrap();
    let mut last_roll = 0;
    for result in session {
        assert_eq!(result.resulting_state.roll_num, last_roll + 1);
        last_roll = result.resulting_state.roll_num;
    }
    assert!(last_roll >= 1);
}
