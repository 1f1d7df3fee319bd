//! Phase 1: put the strategy's bets on the table before the dice are thrown.
//!
//! Order within the phase:
//! 1. Odds behind established line and come bets
//! 2. Pass / don't pass on a come-out roll
//! 3. One new come / don't come bet per roll while a point is on
//! 4. Number bets

use tracing::trace;

use super::record::{BetKind, PlacedBet};
use crate::core::{Bet, BetCollection, ComeBet, Configuration, GameState, NumberBet, PointNumber};
use crate::strategy::{odds_bet_amount, OddsRequest, OddsStrategy};

/// True if a bet of `amount` can be put down from `bankroll` without
/// dipping below the configured floor.
#[must_use]
pub fn can_place_bet(bankroll: f64, amount: f64, bankroll_minimum: Option<f64>) -> bool {
    if amount <= 0.0 || amount > bankroll {
        return false;
    }
    match bankroll_minimum {
        Some(min) if min > 0.0 => bankroll - amount >= min,
        _ => true,
    }
}

/// Working copy of the table while bets are being placed.
struct Placement<'a> {
    cfg: &'a Configuration,
    bankroll: f64,
    bets: BetCollection,
    placed: Vec<PlacedBet>,
}

impl<'a> Placement<'a> {
    /// Debit `amount` for `kind` if affordable.
    fn try_place(&mut self, kind: BetKind, amount: f64) -> bool {
        if !can_place_bet(self.bankroll, amount, self.cfg.bankroll_minimum) {
            return false;
        }
        self.bankroll -= amount;
        self.placed.push(PlacedBet::new(kind, amount));
        trace!(%kind, amount, bankroll = self.bankroll, "placed bet");
        true
    }

    fn odds_for(&self, strategy: OddsStrategy, controlling_bet: f64, point: PointNumber, dont: bool) -> f64 {
        odds_bet_amount(
            strategy,
            &OddsRequest {
                controlling_bet,
                point,
                dont,
                avoid_rounding: self.cfg.avoid_rounding,
                rounding: self.cfg.rounding,
            },
        )
    }

    fn place_line_odds(&mut self, point: Option<PointNumber>) {
        let Some(point) = point else { return };

        if let Some(bet) = self.bets.pass_line_bet.filter(|b| b.odds.is_none()) {
            let odds = self.odds_for(self.cfg.pass_bet_odds_strategy, bet.amount, point, false);
            if self.try_place(BetKind::PassLineOdds, odds) {
                self.bets.pass_line_bet = Some(Bet { odds: Some(odds), ..bet });
            }
        }

        if let Some(bet) = self.bets.dont_pass_bet.filter(|b| b.odds.is_none()) {
            let odds = self.odds_for(self.cfg.dont_pass_bet_odds_strategy, bet.amount, point, true);
            if self.try_place(BetKind::DontPassOdds, odds) {
                self.bets.dont_pass_bet = Some(Bet { odds: Some(odds), ..bet });
            }
        }
    }

    fn place_come_odds(&mut self, point_is_on: bool) {
        if point_is_on || self.cfg.come_bet_odds_working_come_out {
            let strategy = self.cfg.come_bet_odds_strategy;
            for index in 0..self.bets.come_bets.len() {
                let bet = self.bets.come_bets[index];
                let (Some(come_point), None) = (bet.come_point, bet.odds) else { continue };
                let odds = self.odds_for(strategy, bet.amount, come_point, false);
                if self.try_place(BetKind::ComeOdds, odds) {
                    self.bets.come_bets.set(index, ComeBet { odds: Some(odds), ..bet });
                }
            }
        }

        if point_is_on || self.cfg.dont_come_bet_odds_working_come_out {
            let strategy = self.cfg.dont_come_bet_odds_strategy;
            for index in 0..self.bets.dont_come_bets.len() {
                let bet = self.bets.dont_come_bets[index];
                let (Some(come_point), None) = (bet.come_point, bet.odds) else { continue };
                let odds = self.odds_for(strategy, bet.amount, come_point, true);
                if self.try_place(BetKind::DontComeOdds, odds) {
                    self.bets.dont_come_bets.set(index, ComeBet { odds: Some(odds), ..bet });
                }
            }
        }
    }

    fn place_line_bets(&mut self) {
        if let Some(amount) = self.cfg.pass_bet {
            if self.bets.pass_line_bet.is_none() && self.try_place(BetKind::PassLine, amount) {
                self.bets.pass_line_bet = Some(Bet::flat(amount));
            }
        }
        if let Some(amount) = self.cfg.dont_pass_bet {
            if self.bets.dont_pass_bet.is_none() && self.try_place(BetKind::DontPass, amount) {
                self.bets.dont_pass_bet = Some(Bet::flat(amount));
            }
        }
    }

    fn place_come_bets(&mut self) {
        if let Some(amount) = self.cfg.come_bet {
            if self.bets.come_bets.len() < self.cfg.max_come_bets as usize
                && self.try_place(BetKind::Come, amount)
            {
                self.bets.come_bets.push_back(ComeBet::new(amount));
            }
        }
        if let Some(amount) = self.cfg.dont_come_bet {
            if self.bets.dont_come_bets.len() < self.cfg.max_dont_come_bets as usize
                && self.try_place(BetKind::DontCome, amount)
            {
                self.bets.dont_come_bets.push_back(ComeBet::new(amount));
            }
        }
    }

    fn place_number_bets(&mut self, point: Option<PointNumber>, skip: &[PointNumber]) {
        for number in PointNumber::PLACEMENT_ORDER {
            let Some(wager) = self.cfg.number_bet_stake(number) else { continue };
            if self.cfg.omit_number_bet_on_point && point == Some(number) {
                continue;
            }
            if skip.contains(&number) || self.bets.number_bet(number).is_some() {
                continue;
            }
            if self.try_place(BetKind::Number(number), wager) {
                self.bets.number_bets.push_back(NumberBet::new(number, wager));
            }
        }
    }
}

/// Place every bet the strategy calls for.
///
/// Returns the state after placement and the bets put down. Once a limit
/// has been reached no new exposure is opened; existing bets still ride.
pub fn place_bets(state: &GameState) -> (GameState, Vec<PlacedBet>) {
    if state.limit_reached().is_some() {
        return (state.clone(), Vec::new());
    }

    let cfg = state.configuration.as_ref();
    let mut cashed_out = state.cashed_out_numbers.clone();
    let mut table = Placement {
        cfg,
        bankroll: state.bankroll,
        bets: state.current_bets.clone(),
        placed: Vec::new(),
    };

    table.place_line_odds(state.point);
    table.place_come_odds(state.point_is_on());

    match state.point {
        None => {
            table.place_line_bets();
            if cfg.place_number_bets_during_come_out {
                table.place_number_bets(None, &[]);
            }
            // New point cycle: the press limit resets.
            cashed_out.clear();
        }
        Some(point) => {
            table.place_come_bets();
            table.place_number_bets(Some(point), &cashed_out);
        }
    }

    let placed_state = GameState {
        configuration: state.configuration.clone(),
        roll_num: state.roll_num,
        bankroll: table.bankroll,
        point: state.point,
        current_bets: table.bets,
        cashed_out_numbers: cashed_out,
    };
    (placed_state, table.placed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init(config: Configuration) -> GameState {
        GameState::init(config).unwrap()
    }

    #[test]
    fn test_can_place_bet() {
        assert!(can_place_bet(100.0, 15.0, None));
        assert!(!can_place_bet(100.0, 0.0, None));
        assert!(!can_place_bet(10.0, 15.0, None));
        assert!(can_place_bet(65.0, 15.0, Some(50.0)));
        assert!(!can_place_bet(64.0, 15.0, Some(50.0)));
        assert!(can_place_bet(15.0, 15.0, Some(0.0)));
    }

    #[test]
    fn test_come_out_places_line_bets() {
        let config = Configuration::default().with_dont_pass_bet(Some(10.0));
        let (placed, bets) = place_bets(&init(config));

        assert_eq!(
            bets,
            vec![
                PlacedBet::new(BetKind::PassLine, 15.0),
                PlacedBet::new(BetKind::DontPass, 10.0),
            ]
        );
        assert_eq!(placed.bankroll, 275.0);
        assert_eq!(placed.current_bets.pass_line_bet, Some(Bet::flat(15.0)));
    }

    #[test]
    fn test_point_on_places_odds_and_come() {
        let config = Configuration::default()
            .with_pass_bet_odds_strategy(OddsStrategy::Multiplier(2.0))
            .with_come_bet(Some(10.0));
        let mut state = init(config);
        state.point = Some(PointNumber::Six);
        state.current_bets.pass_line_bet = Some(Bet::flat(15.0));

        let (placed, bets) = place_bets(&state);

        assert_eq!(
            bets,
            vec![
                PlacedBet::new(BetKind::PassLineOdds, 30.0),
                PlacedBet::new(BetKind::Come, 10.0),
            ]
        );
        assert_eq!(placed.current_bets.pass_line_bet, Some(Bet { amount: 15.0, odds: Some(30.0) }));
        assert_eq!(placed.current_bets.come_bets.len(), 1);
        assert_eq!(placed.bankroll, 260.0);
    }

    #[test]
    fn test_come_bets_capped() {
        let config = Configuration::default().with_come_bet(Some(10.0)).with_max_come_bets(1);
        let mut state = init(config);
        state.point = Some(PointNumber::Four);
        state.current_bets.come_bets.push_back(ComeBet::new(10.0));

        let (_, bets) = place_bets(&state);
        assert!(bets.iter().all(|b| b.kind != BetKind::Come));
    }

    #[test]
    fn test_come_odds_only_when_travelled() {
        let config = Configuration::default()
            .with_come_bet(Some(10.0))
            .with_max_come_bets(2)
            .with_come_bet_odds_strategy(OddsStrategy::Multiplier(1.0));
        let mut state = init(config);
        state.point = Some(PointNumber::Eight);
        state.current_bets.come_bets.push_back(ComeBet {
            amount: 10.0,
            odds: None,
            come_point: Some(PointNumber::Five),
        });

        let (placed, bets) = place_bets(&state);

        assert_eq!(bets[0], PlacedBet::new(BetKind::ComeOdds, 10.0));
        assert_eq!(placed.current_bets.come_bets[0].odds, Some(10.0));
        // The new come bet has no point yet, so no odds.
        assert_eq!(placed.current_bets.come_bets[1].odds, None);
    }

    #[test]
    fn test_come_odds_off_during_come_out() {
        let config = Configuration::default().with_come_bet_odds_strategy(OddsStrategy::Multiplier(1.0));
        let mut state = init(config.clone());
        state.current_bets.come_bets.push_back(ComeBet {
            amount: 10.0,
            odds: None,
            come_point: Some(PointNumber::Five),
        });

        let (_, bets) = place_bets(&state);
        assert!(bets.iter().all(|b| b.kind != BetKind::ComeOdds));

        let mut working = state.clone();
        working.configuration = config.with_come_bet_odds_working_come_out(true).into();
        let (_, bets) = place_bets(&working);
        assert!(bets.iter().any(|b| b.kind == BetKind::ComeOdds));
    }

    #[test]
    fn test_number_bets_rounded_and_omitted_on_point() {
        let config = Configuration::default()
            .with_pass_bet(None)
            .with_number_bet(PointNumber::Six, Some(10.0))
            .with_number_bet(PointNumber::Eight, Some(10.0))
            .with_number_bet(PointNumber::Four, Some(25.0));
        let mut state = init(config);
        state.point = Some(PointNumber::Eight);

        let (placed, bets) = place_bets(&state);

        assert_eq!(
            bets,
            vec![
                PlacedBet::new(BetKind::Number(PointNumber::Six), 12.0),
                PlacedBet::new(BetKind::Number(PointNumber::Four), 40.0),
            ]
        );
        assert_eq!(placed.current_bets.number_bets.len(), 2);
    }

    #[test]
    fn test_number_bets_wait_for_point_by_default() {
        let config = Configuration::default().with_number_bet(PointNumber::Six, Some(12.0));
        let (_, bets) = place_bets(&init(config.clone()));
        assert_eq!(bets, vec![PlacedBet::new(BetKind::PassLine, 15.0)]);

        let config = config.with_place_number_bets_during_come_out(true);
        let (_, bets) = place_bets(&init(config));
        assert_eq!(bets.len(), 2);
    }

    #[test]
    fn test_cashed_out_numbers_not_replaced_mid_cycle() {
        let config = Configuration::default()
            .with_number_bet(PointNumber::Six, Some(12.0))
            .with_place_number_bets_during_come_out(true);
        let mut state = init(config);
        state.point = Some(PointNumber::Five);
        state.cashed_out_numbers.push(PointNumber::Six);

        let (placed, bets) = place_bets(&state);
        assert!(bets.is_empty());
        assert_eq!(placed.cashed_out_numbers.as_slice(), &[PointNumber::Six]);

        // Come-out clears the list after placing.
        state.point = None;
        let (placed, bets) = place_bets(&state);
        assert!(bets.contains(&PlacedBet::new(BetKind::Number(PointNumber::Six), 12.0)));
        assert!(placed.cashed_out_numbers.is_empty());
    }

    #[test]
    fn test_no_placement_once_limit_reached() {
        let mut state = init(Configuration::default());
        state.roll_num = 400;

        let (placed, bets) = place_bets(&state);
        assert!(bets.is_empty());
        assert_eq!(placed, state);
    }

    #[test]
    fn test_floor_blocks_unaffordable_bets() {
        let config = Configuration::default()
            .with_come_bet(Some(10.0))
            .with_pass_bet_odds_strategy(OddsStrategy::SetAmount(20.0));
        let mut state = init(config);
        state.bankroll = 75.0;
        state.point = Some(PointNumber::Four);
        state.current_bets.pass_line_bet = Some(Bet::flat(15.0));

        // $20 odds would leave $55; then a $10 come bet would breach $50.
        let (placed, bets) = place_bets(&state);
        assert_eq!(bets, vec![PlacedBet::new(BetKind::PassLineOdds, 20.0)]);
        assert_eq!(placed.bankroll, 55.0);
    }
}
