//! Point numbers: the six box numbers a point, come point or number bet
//! can sit on.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// One of 4, 5, 6, 8, 9, 10.
///
/// Serialized as the bare number so snapshots read naturally on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PointNumber {
    Four,
    Five,
    Six,
    Eight,
    Nine,
    Ten,
}

impl PointNumber {
    /// All point numbers in ascending order.
    pub const ALL: [PointNumber; 6] = [
        PointNumber::Four,
        PointNumber::Five,
        PointNumber::Six,
        PointNumber::Eight,
        PointNumber::Nine,
        PointNumber::Ten,
    ];

    /// Order in which number bets are placed: inside numbers first.
    pub const PLACEMENT_ORDER: [PointNumber; 6] = [
        PointNumber::Six,
        PointNumber::Eight,
        PointNumber::Five,
        PointNumber::Nine,
        PointNumber::Four,
        PointNumber::Ten,
    ];

    /// The dice total this number represents.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            PointNumber::Four => 4,
            PointNumber::Five => 5,
            PointNumber::Six => 6,
            PointNumber::Eight => 8,
            PointNumber::Nine => 9,
            PointNumber::Ten => 10,
        }
    }

    /// Convert a dice total, returning `None` for 2, 3, 7, 11, 12.
    #[must_use]
    pub const fn from_roll(total: u8) -> Option<Self> {
        match total {
            4 => Some(PointNumber::Four),
            5 => Some(PointNumber::Five),
            6 => Some(PointNumber::Six),
            8 => Some(PointNumber::Eight),
            9 => Some(PointNumber::Nine),
            10 => Some(PointNumber::Ten),
            _ => None,
        }
    }

    /// 4 or 10.
    #[must_use]
    pub const fn is_outside(self) -> bool {
        matches!(self, PointNumber::Four | PointNumber::Ten)
    }
}

impl TryFrom<u8> for PointNumber {
    type Error = SimError;

    fn try_from(value: u8) -> Result<Self> {
        PointNumber::from_roll(value).ok_or(SimError::InvalidPoint(value))
    }
}

impl From<PointNumber> for u8 {
    fn from(number: PointNumber) -> u8 {
        number.value()
    }
}

impl std::fmt::Display for PointNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_values() {
        for number in PointNumber::ALL {
            assert_eq!(PointNumber::try_from(number.value()), Ok(number));
        }
    }

    #[test]
    fn test_non_points_rejected() {
        for total in [0, 1, 2, 3, 7, 11, 12, 13] {
            assert_eq!(PointNumber::try_from(total), Err(SimError::InvalidPoint(total)));
        }
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&PointNumber::Nine).unwrap();
        assert_eq!(json, "9");
        let parsed: PointNumber = serde_json::from_str("10").unwrap();
        assert_eq!(parsed, PointNumber::Ten);
        assert!(serde_json::from_str::<PointNumber>("7").is_err());
    }

    #[test]
    fn test_placement_order_covers_all() {
        let mut sorted = PointNumber::PLACEMENT_ORDER;
        sorted.sort();
        assert_eq!(sorted, PointNumber::ALL);
    }
}
