//! Number bet (place/buy) payouts.

use super::rounding::Rounding;
use crate::core::PointNumber;

/// Stake at which a 4 or 10 is bought instead of placed.
pub const BUY_THRESHOLD: f64 = 20.0;

/// Winnings on a number bet that hits.
///
/// - 4/10 at $20 or more: bought at 2:1 less a 5% commission on the stake
///   (the commission itself rounded per mode).
/// - 4/10 under $20: placed at 9:5.
/// - 5/9: 7:5.
/// - 6/8: 7:6.
#[must_use]
pub fn number_bet_payout(stake: f64, number: PointNumber, rounding: Rounding) -> f64 {
    use PointNumber::*;
    match number {
        Four | Ten if stake >= BUY_THRESHOLD => {
            let vig = rounding.apply(stake / 20.0);
            stake * 2.0 - vig
        }
        Four | Ten => rounding.apply(stake * 9.0 / 5.0),
        Five | Nine => rounding.apply(stake * 7.0 / 5.0),
        Six | Eight => rounding.apply(stake * 7.0 / 6.0),
    }
}
