//! Rounding modes and the integral-payout ("avoid rounding") adjustments.

use serde::{Deserialize, Serialize};

use crate::core::PointNumber;

/// How fractional money is rounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    /// Floor to the whole dollar.
    #[default]
    Dollar,
    /// Round to the nearest cent.
    Cent,
}

impl Rounding {
    /// Round a money value according to this mode.
    ///
    /// Cent rounding first trims the scaled value to 15 significant digits
    /// so products like `1.005 * 100` land on `100.5` before rounding.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::Dollar => value.floor(),
            Rounding::Cent => {
                let scaled = to_precision(value * 100.0, 15);
                scaled.round() / 100.0
            }
        }
    }
}

impl std::fmt::Display for Rounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rounding::Dollar => write!(f, "dollar"),
            Rounding::Cent => write!(f, "cent"),
        }
    }
}

fn to_precision(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    format!("{:.*e}", digits - 1, value)
        .parse()
        .unwrap_or(value)
}

/// Round `value` up to the nearest multiple of `divisor`.
///
/// Values that are already multiples are returned unchanged.
#[must_use]
pub fn ceil_to_multiple(value: f64, divisor: f64) -> f64 {
    if value % divisor == 0.0 {
        value
    } else {
        divisor * ((value / divisor).floor() + 1.0)
    }
}

/// Round `value` down to the nearest multiple of `divisor`.
#[must_use]
pub fn floor_to_multiple(value: f64, divisor: f64) -> f64 {
    value - value % divisor
}

/// Smallest odds stake at or above `planned` whose payout is a whole number.
///
/// Right-side odds pay 2:1, 3:2 and 6:5, so stakes must be whole, even, or
/// multiples of 5. Lay odds pay 1:2, 2:3 and 5:6, so stakes must be
/// multiples of 2, 3 or 6.
#[must_use]
pub fn odds_avoid_rounding(planned: f64, dont: bool, point: PointNumber) -> f64 {
    use PointNumber::*;
    match (dont, point) {
        (false, Four | Ten) => planned.ceil(),
        (false, Five | Nine) => ceil_to_multiple(planned, 2.0),
        (false, Six | Eight) => ceil_to_multiple(planned, 5.0),
        (true, Four | Ten) => ceil_to_multiple(planned, 2.0),
        (true, Five | Nine) => ceil_to_multiple(planned, 3.0),
        (true, Six | Eight) => ceil_to_multiple(planned, 6.0),
    }
}

/// Smallest number-bet stake at or above `planned` whose payout is whole.
///
/// 4/10 under $20 are placed at 9:5 (multiples of 5), at $20 or more they
/// are bought at 2:1 less 5% (multiples of 20). 5/9 pay 7:5, 6/8 pay 7:6.
#[must_use]
pub fn number_avoid_rounding(planned: f64, number: PointNumber) -> f64 {
    if planned <= 0.0 {
        return planned;
    }
    if number.is_outside() && planned >= 20.0 {
        return ceil_to_multiple(planned, 20.0);
    }
    ceil_to_multiple(planned, clean_unit(planned, number))
}

/// The stake increment that keeps a number bet's payout whole.
#[must_use]
pub fn clean_unit(stake: f64, number: PointNumber) -> f64 {
    use PointNumber::*;
    match number {
        Six | Eight => 6.0,
        Five | Nine => 5.0,
        Four | Ten if stake >= 20.0 => 20.0,
        Four | Ten => 5.0,
    }
}

/// Largest clean stake for `number` that does not exceed `amount`.
#[must_use]
pub fn floor_to_clean_unit(amount: f64, number: PointNumber) -> f64 {
    floor_to_multiple(amount, clean_unit(amount, number))
}
