//! # craps-sim
//!
//! A craps session simulator for evaluating betting strategies.
//!
//! ## Design Principles
//!
//! 1. **Immutable State**: every roll produces a new `GameState`. Nothing is
//!    edited in place, so any state can be kept, compared or replayed.
//!
//! 2. **Injected Randomness**: the engine draws dice from a `DiceSource`
//!    supplied by the caller. Seeded runs are exactly reproducible.
//!
//! 3. **Configuration Over Convention**: every strategy decision (bet
//!    sizes, odds, presses, rounding, limits) comes from `Configuration`.
//!
//! ## Architecture
//!
//! - **Roll Engine**: placement, dice, resolution. One call is one roll,
//!   with a full `RollResult` audit record.
//!
//! - **Persistent Data Structures**: O(1) state cloning via `im-rs`.
//!
//! - **Batch Workers**: sessions are independent, so bulk runs shard them
//!   across a `rayon` pool with forked dice streams.
//!
//! ## Modules
//!
//! - `core`: configuration, bets, game state, dice
//! - `strategy`: odds sizing, payouts, presses, rounding
//! - `engine`: the per-roll state machine and its records
//! - `session`: drives one session to completion
//! - `batch`: bulk simulation and summary statistics

pub mod batch;
pub mod core;
pub mod engine;
pub mod error;
pub mod session;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    Bet, BetCollection, ComeBet, NumberBet,
    Configuration, PointNumber,
    DiceRng, DiceSource, ScriptedDice,
    GameState, LimitReached, SessionSnapshot,
};

pub use crate::strategy::{OddsStrategy, PressStrategy, Rounding};

pub use crate::engine::{
    execute_single_roll,
    BetKind, BetOutcome, DiceRoll, PlacedBet, ResolvedBet, RollResult,
};

pub use crate::session::Session;

pub use crate::batch::{BatchConfig, BatchRunner, BatchSummary, SummaryStats, TableSpeed};

pub use crate::error::{Result, SimError};
