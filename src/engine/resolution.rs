//! Phase 3: settle every bet against the dice, then move the point.
//!
//! Fixed order: pass line, come bets, don't pass, don't come, number bets,
//! point update, come-point assignment. Everything up to the point update
//! sees the point as it was before the roll.

use super::record::{BetKind, BetOutcome, DiceRoll, PlacedBet, ResolvedBet};
use crate::core::{BetCollection, CashedOutNumbers, ComeBet, Configuration, GameState, NumberBet, PointNumber};
use crate::strategy::{dont_odds_payout, number_bet_payout, pass_odds_payout};

/// Pass / come rules against a bet's own point (`None` means come-out).
/// `None` result means the bet stays up.
#[must_use]
pub fn pass_outcome(point: Option<PointNumber>, total: u8) -> Option<BetOutcome> {
    match point {
        None => match total {
            7 | 11 => Some(BetOutcome::Win),
            2 | 3 | 12 => Some(BetOutcome::Loss),
            _ => None,
        },
        Some(p) if total == p.value() => Some(BetOutcome::Win),
        Some(_) if total == 7 => Some(BetOutcome::Loss),
        Some(_) => None,
    }
}

/// Don't pass / don't come rules, including the bar-12 push.
#[must_use]
pub fn dont_outcome(point: Option<PointNumber>, total: u8) -> Option<BetOutcome> {
    match point {
        None => match total {
            2 | 3 => Some(BetOutcome::Win),
            12 => Some(BetOutcome::Push),
            7 | 11 => Some(BetOutcome::Loss),
            _ => None,
        },
        Some(p) if total == p.value() => Some(BetOutcome::Loss),
        Some(_) if total == 7 => Some(BetOutcome::Win),
        Some(_) => None,
    }
}

/// Which side of the table a flat bet and its odds sit on.
#[derive(Clone, Copy)]
struct Side {
    flat: BetKind,
    odds: BetKind,
    dont: bool,
}

const PASS: Side = Side { flat: BetKind::PassLine, odds: BetKind::PassLineOdds, dont: false };
const DONT_PASS: Side = Side { flat: BetKind::DontPass, odds: BetKind::DontPassOdds, dont: true };
const COME: Side = Side { flat: BetKind::Come, odds: BetKind::ComeOdds, dont: false };
const DONT_COME: Side = Side { flat: BetKind::DontCome, odds: BetKind::DontComeOdds, dont: true };

/// Working copy of the table while bets are settled.
struct Resolution<'a> {
    cfg: &'a Configuration,
    total: u8,
    bankroll: f64,
    bets: BetCollection,
    cashed_out: CashedOutNumbers,
    resolved: Vec<ResolvedBet>,
}

impl<'a> Resolution<'a> {
    fn record(&mut self, resolved: ResolvedBet) {
        self.bankroll += resolved.credited;
        self.resolved.push(resolved);
    }

    /// Settle a flat bet and any odds behind it.
    fn settle(
        &mut self,
        side: Side,
        amount: f64,
        odds: Option<f64>,
        point: Option<PointNumber>,
        outcome: BetOutcome,
        odds_working: bool,
    ) {
        let flat = PlacedBet::new(side.flat, amount);
        self.record(match outcome {
            BetOutcome::Win => ResolvedBet::win(flat, amount),
            BetOutcome::Loss => ResolvedBet::loss(flat),
            BetOutcome::Push => ResolvedBet::push(flat),
        });

        let (Some(odds), Some(point)) = (odds, point) else { return };
        let stake = PlacedBet::new(side.odds, odds);
        let rounding = self.cfg.rounding;
        self.record(match outcome {
            _ if !odds_working => ResolvedBet::push(stake),
            BetOutcome::Win if side.dont => ResolvedBet::win(stake, dont_odds_payout(point, odds, rounding)),
            BetOutcome::Win => ResolvedBet::win(stake, pass_odds_payout(point, odds, rounding)),
            BetOutcome::Loss => ResolvedBet::loss(stake),
            BetOutcome::Push => ResolvedBet::push(stake),
        });
    }

    fn resolve_pass_line(&mut self, point: Option<PointNumber>) {
        let Some(bet) = self.bets.pass_line_bet else { return };
        if let Some(outcome) = pass_outcome(point, self.total) {
            self.settle(PASS, bet.amount, bet.odds, point, outcome, true);
            self.bets.pass_line_bet = None;
        }
    }

    fn resolve_dont_pass(&mut self, point: Option<PointNumber>) {
        let Some(bet) = self.bets.dont_pass_bet else { return };
        if let Some(outcome) = dont_outcome(point, self.total) {
            self.settle(DONT_PASS, bet.amount, bet.odds, point, outcome, true);
            self.bets.dont_pass_bet = None;
        }
    }

    fn resolve_come_bets(&mut self, side: Side, odds_working: bool) {
        let bets = if side.dont {
            std::mem::take(&mut self.bets.dont_come_bets)
        } else {
            std::mem::take(&mut self.bets.come_bets)
        };
        let mut remaining = im::Vector::new();
        for bet in bets {
            let outcome = if side.dont {
                dont_outcome(bet.come_point, self.total)
            } else {
                pass_outcome(bet.come_point, self.total)
            };
            match outcome {
                Some(outcome) => {
                    self.settle(side, bet.amount, bet.odds, bet.come_point, outcome, odds_working)
                }
                None => remaining.push_back(bet),
            }
        }
        if side.dont {
            self.bets.dont_come_bets = remaining;
        } else {
            self.bets.come_bets = remaining;
        }
    }

    fn resolve_number_bets(&mut self) {
        if self.total == 7 {
            for bet in std::mem::take(&mut self.bets.number_bets) {
                self.record(ResolvedBet::loss(PlacedBet::new(BetKind::Number(bet.number), bet.wager)));
            }
            return;
        }

        let Some(number) = PointNumber::from_roll(self.total) else { return };
        let Some(index) = self.bets.number_bets.iter().position(|b| b.number == number) else {
            return;
        };

        let bet = self.bets.number_bets[index];
        let rounding = self.cfg.rounding;
        let payout = number_bet_payout(bet.wager, number, rounding);
        let press = self.cfg.press_strategy.apply(bet.wager, payout, number, rounding);
        let wins = bet.consecutive_win_count + 1;
        let limit_hit = self.cfg.press_limit.is_some_and(|limit| wins >= limit);

        let credited = if limit_hit {
            self.bets.number_bets.remove(index);
            if !self.cashed_out.contains(&number) {
                self.cashed_out.push(number);
            }
            press.to_bankroll + press.new_stake
        } else {
            self.bets.number_bets.set(
                index,
                NumberBet {
                    wager: press.new_stake,
                    consecutive_win_count: wins,
                    ..bet
                },
            );
            press.to_bankroll
        };

        self.record(ResolvedBet {
            bet: PlacedBet::new(BetKind::Number(number), bet.wager),
            outcome: BetOutcome::Win,
            payout,
            credited,
        });
    }

    /// Give a come point to every come / don't come bet still travelling.
    fn assign_come_points(&mut self) {
        let Some(number) = PointNumber::from_roll(self.total) else { return };
        let travel = |bet: ComeBet| ComeBet {
            come_point: bet.come_point.or(Some(number)),
            ..bet
        };
        self.bets.come_bets = self.bets.come_bets.iter().copied().map(travel).collect();
        self.bets.dont_come_bets = self.bets.dont_come_bets.iter().copied().map(travel).collect();
    }
}

/// The point after `total` is rolled against `point`.
#[must_use]
pub fn next_point(point: Option<PointNumber>, total: u8) -> Option<PointNumber> {
    match point {
        None => PointNumber::from_roll(total),
        Some(p) if total == p.value() || total == 7 => None,
        Some(p) => Some(p),
    }
}

/// Settle the bets of a post-placement state against `roll`.
///
/// Returns the next state (roll counter advanced) and every bet settled.
pub fn resolve_bets(state: &GameState, roll: DiceRoll) -> (GameState, Vec<ResolvedBet>) {
    let cfg = state.configuration.as_ref();
    let point = state.point;
    let mut table = Resolution {
        cfg,
        total: roll.total(),
        bankroll: state.bankroll,
        bets: state.current_bets.clone(),
        cashed_out: state.cashed_out_numbers.clone(),
        resolved: Vec::new(),
    };

    table.resolve_pass_line(point);
    table.resolve_come_bets(COME, point.is_some() || cfg.come_bet_odds_working_come_out);
    table.resolve_dont_pass(point);
    table.resolve_come_bets(DONT_COME, point.is_some() || cfg.dont_come_bet_odds_working_come_out);
    if point.is_some() || cfg.leave_number_bets_working_during_come_out {
        table.resolve_number_bets();
    }
    table.assign_come_points();

    let next = GameState {
        configuration: state.configuration.clone(),
        roll_num: state.roll_num + 1,
        bankroll: table.bankroll,
        point: next_point(point, table.total),
        current_bets: table.bets,
        cashed_out_numbers: table.cashed_out,
    };
    (next, table.resolved)
}
