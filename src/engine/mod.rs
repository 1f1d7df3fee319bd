//! The roll engine: one discrete transition of a session.
//!
//! `execute_single_roll` runs three phases against an immutable state:
//!
//! 1. **Placement**: odds, line, come and number bets ([`placement`])
//! 2. **Roll**: two dice drawn from the caller's [`DiceSource`]
//! 3. **Resolution**: every bet settled, point and come points moved
//!    ([`resolution`])
//!
//! The caller gets back a [`RollResult`] with the state before, after
//! placement and after resolution.

pub mod placement;
pub mod record;
pub mod resolution;

use tracing::debug;

use crate::core::{DiceSource, GameState};

pub use placement::{can_place_bet, place_bets};
pub use record::{BetKind, BetOutcome, DiceRoll, PlacedBet, ResolvedBet, RollResult};
pub use resolution::{dont_outcome, next_point, pass_outcome, resolve_bets};

/// Draw one roll of two dice.
pub fn roll_dice<D: DiceSource + ?Sized>(dice: &mut D) -> DiceRoll {
    let die1 = dice.roll_die();
    let die2 = dice.roll_die();
    DiceRoll::new(die1, die2)
}

/// Advance `state` by one roll.
///
/// A state that is already done comes back unchanged in an idle record
/// and no dice are drawn.
pub fn execute_single_roll<D: DiceSource + ?Sized>(state: &GameState, dice: &mut D) -> RollResult {
    if state.is_done() {
        return RollResult::idle(state.clone());
    }

    let (placed_bet_state, new_bets) = place_bets(state);
    let roll = roll_dice(dice);
    let (resulting_state, resolved_bets) = resolve_bets(&placed_bet_state, roll);

    debug!(
        roll_num = resulting_state.roll_num,
        total = roll.total(),
        placed = new_bets.len(),
        resolved = resolved_bets.len(),
        bankroll = resulting_state.bankroll,
        point = ?resulting_state.point,
        "roll complete"
    );

    RollResult {
        initial_state: state.clone(),
        new_bets,
        placed_bet_state,
        roll: Some(roll),
        resolved_bets,
        resulting_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Bet, Configuration, PointNumber, ScriptedDice};
    use crate::strategy::OddsStrategy;

    #[test]
    fn test_come_out_win() {
        let state = GameState::init(Configuration::default()).unwrap();
        let mut dice = ScriptedDice::from_rolls(&[(5, 6)]);

        let result = execute_single_roll(&state, &mut dice);

        assert_eq!(result.new_bets, vec![PlacedBet::new(BetKind::PassLine, 15.0)]);
        assert_eq!(result.roll, Some(DiceRoll::new(5, 6)));
        assert_eq!(
            result.resolved_bets,
            vec![ResolvedBet::win(PlacedBet::new(BetKind::PassLine, 15.0), 15.0)]
        );
        assert_eq!(result.placed_bet_state.bankroll, 285.0);
        assert_eq!(result.resulting_state.bankroll, 315.0);
        assert_eq!(result.resulting_state.point, None);
        assert_eq!(result.resulting_state.roll_num, 1);
    }

    #[test]
    fn test_seven_out_with_odds() {
        let config = Configuration::default()
            .with_pass_bet_odds_strategy(OddsStrategy::SetAmount(25.0))
            .with_avoid_rounding(false);
        let mut state = GameState::init(config).unwrap();
        state.point = Some(PointNumber::Six);
        state.current_bets.pass_line_bet = Some(Bet::flat(15.0));
        state.bankroll = 285.0;

        let mut dice = ScriptedDice::from_rolls(&[(3, 4)]);
        let result = execute_single_roll(&state, &mut dice);

        assert_eq!(result.new_bets, vec![PlacedBet::new(BetKind::PassLineOdds, 25.0)]);
        assert_eq!(result.resolved_bets.len(), 2);
        assert!(result.resolved_bets.iter().all(|r| r.outcome == BetOutcome::Loss));
        assert_eq!(result.resulting_state.point, None);
        assert_eq!(result.resulting_state.bankroll, 260.0);
    }

    #[test]
    fn test_done_state_is_idle() {
        let mut state = GameState::init(Configuration::default()).unwrap();
        state.bankroll = 500.0;
        let mut dice = ScriptedDice::from_totals(&[7]);

        let result = execute_single_roll(&state, &mut dice);
        assert!(result.roll.is_none());
        assert_eq!(result.resulting_state, state);
    }

    #[test]
    fn test_conservation_across_rolls() {
        let config = Configuration::default()
            .with_come_bet(Some(10.0))
            .with_dont_come_bet(Some(10.0))
            .with_number_bet(PointNumber::Six, Some(12.0))
            .with_number_bet(PointNumber::Four, Some(20.0))
            .with_come_bet_odds_strategy(OddsStrategy::TableMax);
        let mut state = GameState::init(config).unwrap();
        let mut dice = ScriptedDice::from_totals(&[6, 4, 5, 8, 4, 12, 6, 7, 11, 9, 9, 7]);

        for _ in 0..12 {
            let result = execute_single_roll(&state, &mut dice);
            let expected = result.initial_state.bankroll - result.total_placed() + result.total_credited();
            assert!((result.resulting_state.bankroll - expected).abs() < 1e-9);
            state = result.resulting_state;
        }
    }
}
