//! Bets working on the table.
//!
//! Bet lists use `im::Vector` so each roll's snapshot shares structure with
//! the previous one instead of deep-copying every bet.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::PointNumber;

/// A line bet with optional odds behind it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub amount: f64,
    pub odds: Option<f64>,
}

impl Bet {
    /// A flat bet with no odds.
    #[must_use]
    pub const fn flat(amount: f64) -> Self {
        Self { amount, odds: None }
    }
}

/// A come or don't-come bet; `come_point` is set once it travels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComeBet {
    pub amount: f64,
    pub odds: Option<f64>,
    pub come_point: Option<PointNumber>,
}

impl ComeBet {
    /// A come bet that has not yet travelled to a number.
    #[must_use]
    pub const fn new(amount: f64) -> Self {
        Self {
            amount,
            odds: None,
            come_point: None,
        }
    }
}

/// A place/buy bet on one box number.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberBet {
    pub number: PointNumber,
    pub wager: f64,
    /// Wins since the bet was placed.
    pub consecutive_win_count: u32,
}

impl NumberBet {
    #[must_use]
    pub const fn new(number: PointNumber, wager: f64) -> Self {
        Self {
            number,
            wager,
            consecutive_win_count: 0,
        }
    }
}

/// Every bet currently working for the player.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetCollection {
    pub pass_line_bet: Option<Bet>,
    pub dont_pass_bet: Option<Bet>,
    pub come_bets: Vector<ComeBet>,
    pub dont_come_bets: Vector<ComeBet>,
    pub number_bets: Vector<NumberBet>,
}

impl BetCollection {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any bet is working.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pass_line_bet.is_none()
            && self.dont_pass_bet.is_none()
            && self.come_bets.is_empty()
            && self.dont_come_bets.is_empty()
            && self.number_bets.is_empty()
    }

    /// The live number bet on `number`, if any.
    #[must_use]
    pub fn number_bet(&self, number: PointNumber) -> Option<&NumberBet> {
        self.number_bets.iter().find(|nb| nb.number == number)
    }

    /// Total money currently at risk on the table.
    #[must_use]
    pub fn total_exposure(&self) -> f64 {
        let line = [self.pass_line_bet, self.dont_pass_bet]
            .into_iter()
            .flatten()
            .map(|b| b.amount + b.odds.unwrap_or(0.0));
        let come = self
            .come_bets
            .iter()
            .chain(self.dont_come_bets.iter())
            .map(|c| c.amount + c.odds.unwrap_or(0.0));
        let numbers = self.number_bets.iter().map(|nb| nb.wager);
        line.chain(come).chain(numbers).sum()
    }
}
