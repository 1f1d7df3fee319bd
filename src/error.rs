//! Crate-wide error type.

use thiserror::Error;

/// Errors raised by the simulator.
///
/// Everything here is fatal for the operation that raised it. Bets that
/// cannot be afforded are not errors; the engine skips them for the roll.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("cannot start a session from an invalid configuration: {}", fields.join(", "))]
    InvalidConfiguration { fields: Vec<String> },

    #[error("configuration has no initial bankroll")]
    MissingInitialBankroll,

    #[error("{0} is not a point number (expected 4, 5, 6, 8, 9 or 10)")]
    InvalidPoint(u8),

    #[error("no bet is configured; at least one bet amount must be positive")]
    NoBetConfigured,

    #[error("batch simulation was cancelled")]
    Cancelled,

    #[error("worker pool error: {0}")]
    WorkerPool(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_lists_fields() {
        let err = SimError::InvalidConfiguration {
            fields: vec!["Initial Bankroll".to_string(), "Maximum Rolls".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "cannot start a session from an invalid configuration: Initial Bankroll, Maximum Rolls"
        );
    }

    #[test]
    fn test_invalid_point_message() {
        assert!(SimError::InvalidPoint(7).to_string().starts_with("7 is not a point number"));
    }
}
