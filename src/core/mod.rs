//! Core data model: configuration, bets, game state, dice.
//!
//! Everything here is plain data. Rules live in `engine`; sizing and payout
//! arithmetic lives in `strategy`.

pub mod bets;
pub mod config;
pub mod number;
pub mod rng;
pub mod state;

pub use bets::{Bet, BetCollection, ComeBet, NumberBet};
pub use config::Configuration;
pub use number::PointNumber;
pub use rng::{DiceRng, DiceSource, ScriptedDice};
pub use state::{CashedOutNumbers, GameState, LimitReached, SessionSnapshot};
