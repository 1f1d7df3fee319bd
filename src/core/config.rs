//! Session configuration.
//!
//! A `Configuration` bundles every strategy parameter for one player's
//! session: bankroll bounds, bet sizes, odds and press strategies, and the
//! rounding mode. It is immutable in use; every `with_*` setter consumes the
//! value and returns an updated copy.
//!
//! Money fields are normalized through the configured rounding mode when
//! set, so under `Rounding::Dollar` a $15.75 pass line bet becomes $15.

use serde::{Deserialize, Serialize};

use super::PointNumber;
use crate::strategy::{number_avoid_rounding, OddsStrategy, PressStrategy, Rounding};

/// Complete strategy configuration for a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    // === Bankroll and limits ===
    pub initial_bankroll: Option<f64>,
    pub bankroll_minimum: Option<f64>,
    pub bankroll_maximum: Option<f64>,
    pub maximum_rolls: Option<u32>,

    // === Line bets ===
    pub pass_bet: Option<f64>,
    pub pass_bet_odds_strategy: OddsStrategy,
    pub dont_pass_bet: Option<f64>,
    pub dont_pass_bet_odds_strategy: OddsStrategy,

    // === Come bets ===
    pub come_bet: Option<f64>,
    pub max_come_bets: u32,
    pub come_bet_odds_strategy: OddsStrategy,
    /// Come odds stay working on a come-out roll.
    pub come_bet_odds_working_come_out: bool,
    pub dont_come_bet: Option<f64>,
    pub max_dont_come_bets: u32,
    pub dont_come_bet_odds_strategy: OddsStrategy,
    /// Don't-come odds stay working on a come-out roll.
    pub dont_come_bet_odds_working_come_out: bool,

    // === Number bets ===
    #[serde(rename = "numberBet4")]
    pub number_bet_4: Option<f64>,
    #[serde(rename = "numberBet5")]
    pub number_bet_5: Option<f64>,
    #[serde(rename = "numberBet6")]
    pub number_bet_6: Option<f64>,
    #[serde(rename = "numberBet8")]
    pub number_bet_8: Option<f64>,
    #[serde(rename = "numberBet9")]
    pub number_bet_9: Option<f64>,
    #[serde(rename = "numberBet10")]
    pub number_bet_10: Option<f64>,
    pub place_number_bets_during_come_out: bool,
    pub leave_number_bets_working_during_come_out: bool,
    /// Skip the number bet that matches the current point.
    pub omit_number_bet_on_point: bool,

    // === Press ===
    /// Consecutive wins after which a number bet is taken down.
    pub press_limit: Option<u32>,
    pub press_strategy: PressStrategy,

    // === Rounding ===
    pub avoid_rounding: bool,
    pub rounding: Rounding,

    /// Sessions to run in a batch.
    pub simulation_count: Option<u32>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            initial_bankroll: Some(300.0),
            bankroll_minimum: Some(50.0),
            bankroll_maximum: Some(450.0),
            maximum_rolls: Some(400),
            pass_bet: Some(15.0),
            pass_bet_odds_strategy: OddsStrategy::None,
            dont_pass_bet: None,
            dont_pass_bet_odds_strategy: OddsStrategy::None,
            come_bet: None,
            max_come_bets: 3,
            come_bet_odds_strategy: OddsStrategy::None,
            come_bet_odds_working_come_out: false,
            dont_come_bet: None,
            max_dont_come_bets: 3,
            dont_come_bet_odds_strategy: OddsStrategy::None,
            dont_come_bet_odds_working_come_out: false,
            number_bet_4: None,
            number_bet_5: None,
            number_bet_6: None,
            number_bet_8: None,
            number_bet_9: None,
            number_bet_10: None,
            place_number_bets_during_come_out: false,
            leave_number_bets_working_during_come_out: false,
            omit_number_bet_on_point: true,
            press_limit: None,
            press_strategy: PressStrategy::NoPress,
            avoid_rounding: true,
            rounding: Rounding::Dollar,
            simulation_count: Some(10_000),
        }
    }
}

impl Configuration {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    fn money(&self, value: Option<f64>) -> Option<f64> {
        value.map(|v| self.rounding.apply(v))
    }

    /// Re-apply the rounding mode to every money field.
    ///
    /// Setters already do this; call it after deserializing.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.initial_bankroll = self.money(self.initial_bankroll);
        self.bankroll_minimum = self.money(self.bankroll_minimum);
        self.bankroll_maximum = self.money(self.bankroll_maximum);
        self.pass_bet = self.money(self.pass_bet);
        self.dont_pass_bet = self.money(self.dont_pass_bet);
        self.come_bet = self.money(self.come_bet);
        self.dont_come_bet = self.money(self.dont_come_bet);
        for number in PointNumber::ALL {
            let amount = self.money(self.number_bet(number));
            *self.number_bet_slot(number) = amount;
        }
        self
    }

    // === Setters ===

    #[must_use]
    pub fn with_initial_bankroll(mut self, value: Option<f64>) -> Self {
        self.initial_bankroll = self.money(value);
        self
    }

    #[must_use]
    pub fn with_bankroll_minimum(mut self, value: Option<f64>) -> Self {
        self.bankroll_minimum = self.money(value);
        self
    }

    #[must_use]
    pub fn with_bankroll_maximum(mut self, value: Option<f64>) -> Self {
        self.bankroll_maximum = self.money(value);
        self
    }

    #[must_use]
    pub fn with_maximum_rolls(mut self, value: Option<u32>) -> Self {
        self.maximum_rolls = value;
        self
    }

    #[must_use]
    pub fn with_pass_bet(mut self, value: Option<f64>) -> Self {
        self.pass_bet = self.money(value);
        self
    }

    #[must_use]
    pub fn with_pass_bet_odds_strategy(mut self, value: OddsStrategy) -> Self {
        self.pass_bet_odds_strategy = value;
        self
    }

    #[must_use]
    pub fn with_dont_pass_bet(mut self, value: Option<f64>) -> Self {
        self.dont_pass_bet = self.money(value);
        self
    }

    #[must_use]
    pub fn with_dont_pass_bet_odds_strategy(mut self, value: OddsStrategy) -> Self {
        self.dont_pass_bet_odds_strategy = value;
        self
    }

    #[must_use]
    pub fn with_come_bet(mut self, value: Option<f64>) -> Self {
        self.come_bet = self.money(value);
        self
    }

    #[must_use]
    pub fn with_max_come_bets(mut self, value: u32) -> Self {
        self.max_come_bets = value;
        self
    }

    #[must_use]
    pub fn with_come_bet_odds_strategy(mut self, value: OddsStrategy) -> Self {
        self.come_bet_odds_strategy = value;
        self
    }

    #[must_use]
    pub fn with_come_bet_odds_working_come_out(mut self, value: bool) -> Self {
        self.come_bet_odds_working_come_out = value;
        self
    }

    #[must_use]
    pub fn with_dont_come_bet(mut self, value: Option<f64>) -> Self {
        self.dont_come_bet = self.money(value);
        self
    }

    #[must_use]
    pub fn with_max_dont_come_bets(mut self, value: u32) -> Self {
        self.max_dont_come_bets = value;
        self
    }

    #[must_use]
    pub fn with_dont_come_bet_odds_strategy(mut self, value: OddsStrategy) -> Self {
        self.dont_come_bet_odds_strategy = value;
        self
    }

    #[must_use]
    pub fn with_dont_come_bet_odds_working_come_out(mut self, value: bool) -> Self {
        self.dont_come_bet_odds_working_come_out = value;
        self
    }

    /// Set the number bet amount for one box number.
    #[must_use]
    pub fn with_number_bet(mut self, number: PointNumber, value: Option<f64>) -> Self {
        let amount = self.money(value);
        *self.number_bet_slot(number) = amount;
        self
    }

    #[must_use]
    pub fn with_place_number_bets_during_come_out(mut self, value: bool) -> Self {
        self.place_number_bets_during_come_out = value;
        self
    }

    #[must_use]
    pub fn with_leave_number_bets_working_during_come_out(mut self, value: bool) -> Self {
        self.leave_number_bets_working_during_come_out = value;
        self
    }

    #[must_use]
    pub fn with_omit_number_bet_on_point(mut self, value: bool) -> Self {
        self.omit_number_bet_on_point = value;
        self
    }

    #[must_use]
    pub fn with_press_limit(mut self, value: Option<u32>) -> Self {
        self.press_limit = value;
        self
    }

    #[must_use]
    pub fn with_press_strategy(mut self, value: PressStrategy) -> Self {
        self.press_strategy = value;
        self
    }

    #[must_use]
    pub fn with_avoid_rounding(mut self, value: bool) -> Self {
        self.avoid_rounding = value;
        self
    }

    /// Change the rounding mode, re-normalizing money fields.
    #[must_use]
    pub fn with_rounding(mut self, value: Rounding) -> Self {
        self.rounding = value;
        self.normalized()
    }

    #[must_use]
    pub fn with_simulation_count(mut self, value: Option<u32>) -> Self {
        self.simulation_count = value;
        self
    }

    // === Accessors ===

    /// Configured amount for the number bet on `number`.
    #[must_use]
    pub fn number_bet(&self, number: PointNumber) -> Option<f64> {
        match number {
            PointNumber::Four => self.number_bet_4,
            PointNumber::Five => self.number_bet_5,
            PointNumber::Six => self.number_bet_6,
            PointNumber::Eight => self.number_bet_8,
            PointNumber::Nine => self.number_bet_9,
            PointNumber::Ten => self.number_bet_10,
        }
    }

    fn number_bet_slot(&mut self, number: PointNumber) -> &mut Option<f64> {
        match number {
            PointNumber::Four => &mut self.number_bet_4,
            PointNumber::Five => &mut self.number_bet_5,
            PointNumber::Six => &mut self.number_bet_6,
            PointNumber::Eight => &mut self.number_bet_8,
            PointNumber::Nine => &mut self.number_bet_9,
            PointNumber::Ten => &mut self.number_bet_10,
        }
    }

    /// Every configured base bet amount, including unset ones.
    pub fn base_bets(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        [self.pass_bet, self.dont_pass_bet, self.come_bet, self.dont_come_bet]
            .into_iter()
            .chain(PointNumber::ALL.into_iter().map(|n| self.number_bet(n)))
    }

    /// What placing the number bet actually costs: the configured amount,
    /// raised to a clean multiple when rounding is avoided.
    pub fn number_bet_stake(&self, number: PointNumber) -> Option<f64> {
        let amount = self.number_bet(number).filter(|&a| a > 0.0)?;
        Some(if self.avoid_rounding {
            number_avoid_rounding(amount, number)
        } else {
            amount
        })
    }

    /// Every base bet placement can charge, at the amount it charges.
    ///
    /// Come and don't come bets capped at zero are never placed.
    pub fn placeable_bets(&self) -> impl Iterator<Item = f64> + '_ {
        let come = self.come_bet.filter(|_| self.max_come_bets > 0);
        let dont_come = self.dont_come_bet.filter(|_| self.max_dont_come_bets > 0);
        [self.pass_bet, self.dont_pass_bet, come, dont_come]
            .into_iter()
            .chain(PointNumber::ALL.into_iter().map(|n| self.number_bet_stake(n)))
            .flatten()
            .filter(|&amount| amount > 0.0)
    }

    // === Validation ===

    pub fn is_initial_bankroll_valid(&self) -> bool {
        self.initial_bankroll.is_some_and(|b| b > 0.0)
    }

    pub fn is_bankroll_minimum_valid(&self) -> bool {
        match (self.initial_bankroll, self.bankroll_minimum) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(initial), Some(min)) => min >= 0.0 && min < initial,
        }
    }

    pub fn is_bankroll_maximum_valid(&self) -> bool {
        match (self.initial_bankroll, self.bankroll_maximum) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(initial), Some(max)) => max > initial,
        }
    }

    pub fn is_maximum_rolls_valid(&self) -> bool {
        self.maximum_rolls.map_or(true, |r| r > 0)
    }

    pub fn is_simulation_count_valid(&self) -> bool {
        self.simulation_count.is_some_and(|c| c > 0)
    }

    pub fn is_press_limit_valid(&self) -> bool {
        self.press_limit.map_or(true, |l| l >= 1)
    }

    /// True if at least one base bet is configured.
    pub fn has_any_bet(&self) -> bool {
        self.base_bets().any(|b| b.is_some())
    }

    /// Human-readable names of every invalid field.
    pub fn invalid_fields(&self) -> Vec<String> {
        let checks = [
            (self.is_initial_bankroll_valid(), "Initial Bankroll"),
            (self.is_bankroll_minimum_valid(), "Bankroll Minimum"),
            (self.is_bankroll_maximum_valid(), "Bankroll Maximum"),
            (self.is_maximum_rolls_valid(), "Maximum Rolls"),
            (self.is_simulation_count_valid(), "Simulation Count"),
            (
                self.is_press_limit_valid(),
                "Press Limit (must be empty for unlimited or 1 or greater)",
            ),
            (self.has_any_bet(), "At least one bet must be configured."),
        ];
        checks
            .into_iter()
            .filter(|(valid, _)| !valid)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// True if a session can be started from this configuration.
    pub fn is_runnable(&self) -> bool {
        self.invalid_fields().is_empty()
    }
}
