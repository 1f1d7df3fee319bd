//! Strategy evaluators: pure functions over configuration and bet values.
//!
//! - `odds`: odds stake sizing and true-odds payouts
//! - `payout`: place/buy payouts for number bets
//! - `press`: reinvestment of number bet winnings
//! - `rounding`: rounding modes and integral-payout adjustments

pub mod odds;
pub mod payout;
pub mod press;
pub mod rounding;

pub use odds::{dont_odds_payout, odds_bet_amount, pass_odds_payout, OddsRequest, OddsStrategy};
pub use payout::{number_bet_payout, BUY_THRESHOLD};
pub use press::{Press, PressStrategy};
pub use rounding::{number_avoid_rounding, odds_avoid_rounding, Rounding};
