//! Game state: an immutable snapshot of one session at a point in time.
//!
//! ## GameState
//!
//! - Configuration (shared, never mutated)
//! - Roll counter and bankroll
//! - Point status
//! - Every working bet
//! - Numbers taken down by the press limit during the current point cycle
//!
//! The roll engine never edits a `GameState` in place; each transition
//! builds a new one. Cloning is cheap: the configuration sits behind an
//! `Arc` and bet lists are persistent vectors.
//!
//! ## SessionSnapshot
//!
//! The configuration-free subset of a state that batch workers send back.
//! `GameState::from_snapshot` re-attaches a configuration on receipt.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::bets::BetCollection;
use super::config::Configuration;
use super::PointNumber;
use crate::error::{Result, SimError};

/// Numbers cashed out by the press limit this point cycle.
pub type CashedOutNumbers = SmallVec<[PointNumber; 6]>;

/// Why a session stopped (or would stop once bets are played out).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitReached {
    /// Bankroll reached the configured upper bound.
    BankrollMax,
    /// Bankroll reached the configured floor, or is too close to it to bet.
    BankrollMin,
    /// Bankroll cannot cover even the smallest configured bet.
    Busted,
    /// Roll counter reached the configured maximum.
    MaxRolls,
}

impl LimitReached {
    /// Every limit kind.
    pub const ALL: [LimitReached; 4] = [
        LimitReached::BankrollMax,
        LimitReached::BankrollMin,
        LimitReached::Busted,
        LimitReached::MaxRolls,
    ];
}

impl std::fmt::Display for LimitReached {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LimitReached::BankrollMax => "Upper Bankroll Limit",
            LimitReached::BankrollMin => "Lower Bankroll Limit",
            LimitReached::Busted => "Busted",
            LimitReached::MaxRolls => "Roll Limit",
        };
        f.pad(label)
    }
}

/// One session at a point in time.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub configuration: Arc<Configuration>,
    /// Rolls completed so far.
    pub roll_num: u32,
    pub bankroll: f64,
    /// The point, when one is established.
    pub point: Option<PointNumber>,
    pub current_bets: BetCollection,
    pub cashed_out_numbers: CashedOutNumbers,
}

impl GameState {
    /// Start a session.
    ///
    /// Fails if the configuration does not pass validation or has no
    /// initial bankroll.
    pub fn init(configuration: impl Into<Arc<Configuration>>) -> Result<Self> {
        let configuration = configuration.into();
        let invalid = configuration.invalid_fields();
        if !invalid.is_empty() {
            return Err(SimError::InvalidConfiguration { fields: invalid });
        }
        let bankroll = configuration
            .initial_bankroll
            .ok_or(SimError::MissingInitialBankroll)?;

        Ok(Self {
            configuration,
            roll_num: 0,
            bankroll,
            point: None,
            current_bets: BetCollection::new(),
            cashed_out_numbers: CashedOutNumbers::new(),
        })
    }

    /// True while a point is established.
    #[must_use]
    pub fn point_is_on(&self) -> bool {
        self.point.is_some()
    }

    /// True if any bet is still working.
    #[must_use]
    pub fn has_active_bet(&self) -> bool {
        !self.current_bets.is_empty()
    }

    /// The smallest positive bet placement could charge.
    ///
    /// Number bets count at their rounding-adjusted stake, so a $10 six
    /// costs $12 when rounding is avoided.
    pub fn min_bet_amount(&self) -> Result<f64> {
        self.configuration
            .placeable_bets()
            .min_by(f64::total_cmp)
            .ok_or(SimError::NoBetConfigured)
    }

    /// The first limit this state has hit, in precedence order.
    ///
    /// A configuration with no positive bet reports `Busted`, since no bet
    /// could ever be placed.
    #[must_use]
    pub fn limit_reached(&self) -> Option<LimitReached> {
        let cfg = &self.configuration;
        let floor = cfg.bankroll_minimum.filter(|&min| min > 0.0);

        if floor.is_some_and(|min| self.bankroll <= min) {
            return Some(LimitReached::BankrollMin);
        }
        if cfg.bankroll_maximum.is_some_and(|max| self.bankroll >= max) {
            return Some(LimitReached::BankrollMax);
        }
        if cfg.maximum_rolls.is_some_and(|max| self.roll_num >= max) {
            return Some(LimitReached::MaxRolls);
        }

        let Ok(min_bet) = self.min_bet_amount() else {
            return Some(LimitReached::Busted);
        };
        if self.bankroll < min_bet {
            return Some(LimitReached::Busted);
        }
        if let Some(min) = floor {
            let margin = self.bankroll - min;
            if margin > 0.0 && margin < min_bet {
                return Some(LimitReached::BankrollMin);
            }
        }
        None
    }

    /// True once no bet is working and a limit has been reached.
    ///
    /// Working bets are always played out, even past a limit.
    #[must_use]
    pub fn is_done(&self) -> bool {
        !self.has_active_bet() && self.limit_reached().is_some()
    }

    /// Net result against the starting bankroll.
    #[must_use]
    pub fn net(&self) -> f64 {
        self.bankroll - self.configuration.initial_bankroll.unwrap_or(0.0)
    }

    /// The configuration-free part of this state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            roll_num: self.roll_num,
            bankroll: self.bankroll,
            point: self.point,
            current_bets: self.current_bets.clone(),
            cashed_out_numbers: self.cashed_out_numbers.clone(),
        }
    }

    /// Rebuild a full state from a snapshot and its configuration.
    #[must_use]
    pub fn from_snapshot(configuration: Arc<Configuration>, snapshot: SessionSnapshot) -> Self {
        Self {
            configuration,
            roll_num: snapshot.roll_num,
            bankroll: snapshot.bankroll,
            point: snapshot.point,
            current_bets: snapshot.current_bets,
            cashed_out_numbers: snapshot.cashed_out_numbers,
        }
    }
}

/// Plain-data view of a `GameState`, without its configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub roll_num: u32,
    pub bankroll: f64,
    pub point: Option<PointNumber>,
    pub current_bets: BetCollection,
    pub cashed_out_numbers: CashedOutNumbers,
}
