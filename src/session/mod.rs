//! Session driver: repeat the roll engine until the session is done.

use std::sync::Arc;

use tracing::debug;

use crate::core::{Configuration, DiceRng, DiceSource, GameState};
use crate::engine::{execute_single_roll, RollResult};
use crate::error::Result;

/// One player's run at the table, from first bet to walking away.
///
/// Iterating a session yields one [`RollResult`] per roll and stops once
/// the state is done.
#[derive(Clone, Debug)]
pub struct Session<D: DiceSource> {
    state: GameState,
    dice: D,
}

impl Session<DiceRng> {
    /// Start a session with a seeded dice stream.
    pub fn seeded(configuration: impl Into<Arc<Configuration>>, seed: u64) -> Result<Self> {
        Self::new(configuration, DiceRng::new(seed))
    }
}

impl<D: DiceSource> Session<D> {
    /// Start a session from a configuration.
    pub fn new(configuration: impl Into<Arc<Configuration>>, dice: D) -> Result<Self> {
        Ok(Self::from_state(GameState::init(configuration)?, dice))
    }

    /// Resume from an existing state.
    pub fn from_state(state: GameState, dice: D) -> Self {
        Self { state, dice }
    }

    /// The current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// True once no bets are working and a limit has been reached.
    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    /// Play one roll. Returns `None` once the session is done.
    pub fn step(&mut self) -> Option<RollResult> {
        if self.state.is_done() {
            return None;
        }
        let result = execute_single_roll(&self.state, &mut self.dice);
        self.state = result.resulting_state.clone();
        if self.state.is_done() {
            debug!(
                rolls = self.state.roll_num,
                bankroll = self.state.bankroll,
                limit = ?self.state.limit_reached(),
                "session finished"
            );
        }
        Some(result)
    }

    /// Play until done and return the final state.
    pub fn run_to_completion(mut self) -> GameState {
        while self.step().is_some() {}
        self.state
    }

    /// Play until done, keeping every roll.
    pub fn play_out(self) -> Vec<RollResult> {
        self.collect()
    }
}

impl<D: DiceSource> Iterator for Session<D> {
    type Item = RollResult;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}
