//! Press strategies: what to do with a number bet's winnings.

use serde::{Deserialize, Serialize};

use super::rounding::{floor_to_clean_unit, Rounding};
use crate::core::PointNumber;

/// How much of a winning number bet's payout goes back on the bet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PressStrategy {
    /// Bank every payout.
    #[default]
    NoPress,
    /// Press half the payout, bank the rest.
    HalfPress,
    /// Press the entire payout.
    FullPress,
    /// Press as much as possible while keeping the stake a clean unit.
    PowerPress,
    /// Press until the stake reaches the target, then bank.
    PressUntil(f64),
}

/// Outcome of applying a press strategy to one win.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Press {
    /// Stake left working after the press.
    pub new_stake: f64,
    /// Amount paid to the bankroll.
    pub to_bankroll: f64,
}

impl PressStrategy {
    /// Split `payout` between the bet and the bankroll.
    ///
    /// `new_stake - stake + to_bankroll == payout` always holds. Both parts
    /// are snapped to whole cents.
    #[must_use]
    pub fn apply(self, stake: f64, payout: f64, number: PointNumber, rounding: Rounding) -> Press {
        let pressed = match self {
            PressStrategy::NoPress => 0.0,
            PressStrategy::HalfPress => rounding.apply(payout / 2.0),
            PressStrategy::FullPress => payout,
            PressStrategy::PowerPress => {
                let clean = floor_to_clean_unit(stake + payout, number);
                (clean - stake).max(0.0)
            }
            PressStrategy::PressUntil(target) => (target - stake).clamp(0.0, payout),
        };
        let new_stake = Rounding::Cent.apply(stake + pressed);
        Press {
            new_stake,
            to_bankroll: Rounding::Cent.apply(payout - (new_stake - stake)),
        }
    }
}

impl std::fmt::Display for PressStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PressStrategy::NoPress => write!(f, "no press"),
            PressStrategy::HalfPress => write!(f, "half press"),
            PressStrategy::FullPress => write!(f, "full press"),
            PressStrategy::PowerPress => write!(f, "power press"),
            PressStrategy::PressUntil(target) => write!(f, "press until {target}"),
        }
    }
}
