//! Records of what happened during one roll.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PointNumber};

/// Every kind of bet the engine places.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetKind {
    PassLine,
    PassLineOdds,
    DontPass,
    DontPassOdds,
    Come,
    ComeOdds,
    DontCome,
    DontComeOdds,
    Number(PointNumber),
}

impl std::fmt::Display for BetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BetKind::PassLine => write!(f, "Pass Line Bet"),
            BetKind::PassLineOdds => write!(f, "Pass Line Odds Bet"),
            BetKind::DontPass => write!(f, "Don't Pass Bet"),
            BetKind::DontPassOdds => write!(f, "Don't Pass Odds Bet"),
            BetKind::Come => write!(f, "Come Bet"),
            BetKind::ComeOdds => write!(f, "Come Odds Bet"),
            BetKind::DontCome => write!(f, "Don't Come Bet"),
            BetKind::DontComeOdds => write!(f, "Don't Come Odds Bet"),
            BetKind::Number(n) => write!(f, "Number Bet ({n})"),
        }
    }
}

/// How a bet was settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetOutcome {
    Win,
    Loss,
    Push,
}

/// A bet put on the table this roll.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedBet {
    pub kind: BetKind,
    pub amount: f64,
}

impl PlacedBet {
    #[must_use]
    pub const fn new(kind: BetKind, amount: f64) -> Self {
        Self { kind, amount }
    }
}

/// A bet settled by this roll.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBet {
    pub bet: PlacedBet,
    pub outcome: BetOutcome,
    /// Winnings, excluding returned principal. Zero for losses and pushes.
    pub payout: f64,
    /// Everything credited to the bankroll: returned principal plus any
    /// winnings that were not pressed back onto the bet.
    pub credited: f64,
}

impl ResolvedBet {
    /// A flat win: principal returned with winnings.
    #[must_use]
    pub fn win(bet: PlacedBet, payout: f64) -> Self {
        Self {
            bet,
            outcome: BetOutcome::Win,
            payout,
            credited: bet.amount + payout,
        }
    }

    #[must_use]
    pub fn loss(bet: PlacedBet) -> Self {
        Self {
            bet,
            outcome: BetOutcome::Loss,
            payout: 0.0,
            credited: 0.0,
        }
    }

    /// Principal returned, nothing won.
    #[must_use]
    pub fn push(bet: PlacedBet) -> Self {
        Self {
            bet,
            outcome: BetOutcome::Push,
            payout: 0.0,
            credited: bet.amount,
        }
    }
}

/// The two dice thrown this roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub die1: u8,
    pub die2: u8,
}

impl DiceRoll {
    #[must_use]
    pub const fn new(die1: u8, die2: u8) -> Self {
        Self { die1, die2 }
    }

    /// Sum of both dice.
    #[must_use]
    pub const fn total(self) -> u8 {
        self.die1 + self.die2
    }
}

/// Complete audit of one roll.
#[derive(Clone, Debug)]
pub struct RollResult {
    /// State before anything happened.
    pub initial_state: GameState,
    /// Bets put down before the dice were thrown.
    pub new_bets: Vec<PlacedBet>,
    /// State after placement, before the dice.
    pub placed_bet_state: GameState,
    /// `None` only if the session was already done.
    pub roll: Option<DiceRoll>,
    pub resolved_bets: Vec<ResolvedBet>,
    pub resulting_state: GameState,
}

impl RollResult {
    /// The no-op record produced for a finished session.
    #[must_use]
    pub fn idle(state: GameState) -> Self {
        Self {
            initial_state: state.clone(),
            new_bets: Vec::new(),
            placed_bet_state: state.clone(),
            roll: None,
            resolved_bets: Vec::new(),
            resulting_state: state,
        }
    }

    /// Total staked by new bets this roll.
    #[must_use]
    pub fn total_placed(&self) -> f64 {
        self.new_bets.iter().map(|b| b.amount).sum()
    }

    /// Total credited back to the bankroll this roll.
    #[must_use]
    pub fn total_credited(&self) -> f64 {
        self.resolved_bets.iter().map(|r| r.credited).sum()
    }

    /// Bankroll change across the whole roll.
    #[must_use]
    pub fn bankroll_delta(&self) -> f64 {
        self.resulting_state.bankroll - self.initial_state.bankroll
    }
}
