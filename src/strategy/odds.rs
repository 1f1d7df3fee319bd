//! Odds bet sizing and true-odds payouts.

use serde::{Deserialize, Serialize};

use super::rounding::{odds_avoid_rounding, Rounding};
use crate::core::PointNumber;

/// How much odds to lay or take behind a line or come bet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum OddsStrategy {
    /// Never take odds.
    #[default]
    None,
    /// A fixed odds stake.
    SetAmount(f64),
    /// A multiple of the controlling bet.
    Multiplier(f64),
    /// Table maximum: 3-4-5x on the right side, flat 6x on the dark side.
    TableMax,
}

/// Inputs for sizing one odds stake.
#[derive(Clone, Copy, Debug)]
pub struct OddsRequest {
    /// The flat bet the odds sit behind.
    pub controlling_bet: f64,
    /// The point (or come point) the odds are working on.
    pub point: PointNumber,
    /// Don't-pass / don't-come side.
    pub dont: bool,
    pub avoid_rounding: bool,
    pub rounding: Rounding,
}

/// Size the odds stake for `request` under `strategy`.
///
/// Returns 0 when no odds should be placed.
#[must_use]
pub fn odds_bet_amount(strategy: OddsStrategy, request: &OddsRequest) -> f64 {
    let raw = match strategy {
        OddsStrategy::None => return 0.0,
        OddsStrategy::SetAmount(amount) => amount,
        OddsStrategy::Multiplier(multiple) => request.controlling_bet * multiple,
        OddsStrategy::TableMax => table_max_multiple(request.dont, request.point) * request.controlling_bet,
    };
    if raw <= 0.0 {
        return 0.0;
    }
    if request.avoid_rounding {
        odds_avoid_rounding(raw, request.dont, request.point)
    } else {
        request.rounding.apply(raw)
    }
}

fn table_max_multiple(dont: bool, point: PointNumber) -> f64 {
    use PointNumber::*;
    if dont {
        return 6.0;
    }
    match point {
        Four | Ten => 3.0,
        Five | Nine => 4.0,
        Six | Eight => 5.0,
    }
}

/// Winnings on a pass/come odds stake: 2:1, 3:2, 6:5.
#[must_use]
pub fn pass_odds_payout(point: PointNumber, odds: f64, rounding: Rounding) -> f64 {
    use PointNumber::*;
    let raw = match point {
        Four | Ten => odds * 2.0,
        Five | Nine => odds * 3.0 / 2.0,
        Six | Eight => odds * 6.0 / 5.0,
    };
    rounding.apply(raw)
}

/// Winnings on a don't-pass/don't-come odds stake: 1:2, 2:3, 5:6.
#[must_use]
pub fn dont_odds_payout(point: PointNumber, odds: f64, rounding: Rounding) -> f64 {
    use PointNumber::*;
    let raw = match point {
        Four | Ten => odds / 2.0,
        Five | Nine => odds * 2.0 / 3.0,
        Six | Eight => odds * 5.0 / 6.0,
    };
    rounding.apply(raw)
}
