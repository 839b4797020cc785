//! Per-account staking position

use candid::{CandidType, Nat};
use serde::Deserialize;

/// One account's staked principal and its accrual window.
///
/// The store holds at most one position per account; a missing entry is
/// equivalent to a zero-amount position, and a position whose amount drops
/// to zero is removed rather than kept around.
#[derive(Clone, Default)]
pub struct Position {
    /// Currently staked principal
    pub amount: u128,
    /// Start of the current accrual window, in seconds
    pub start_time: u64,
    /// True once interest for the current window was paid out or forfeited
    pub interest_claimed: bool,
}

impl Position {
    /// Opens a fresh accrual window holding `amount`.
    pub fn open(amount: u128, start_time: u64) -> Self {
        Self {
            amount,
            start_time,
            interest_claimed: false,
        }
    }
}

/// Candid-facing view of a position
#[derive(Clone, CandidType, Deserialize)]
pub struct PositionQuery {
    /// Currently staked principal
    pub amount: Nat,
    /// Start of the current accrual window, in seconds
    pub start_time: u64,
    /// True once interest for the current window was paid out or forfeited
    pub interest_claimed: bool,
}

impl From<Position> for PositionQuery {
    fn from(value: Position) -> Self {
        Self {
            amount: Nat::from(value.amount),
            start_time: value.start_time,
            interest_claimed: value.interest_claimed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_starts_a_fresh_window() {
        let position = Position::open(1_000, 42);
        assert_eq!(position.amount, 1_000);
        assert_eq!(position.start_time, 42);
        assert!(!position.interest_claimed);
    }

    #[test]
    fn query_conversion_preserves_fields() {
        let position = Position {
            amount: 777,
            start_time: 1_700_000_000,
            interest_claimed: true,
        };

        let query = PositionQuery::from(position);
        assert_eq!(query.amount, Nat::from(777_u64));
        assert_eq!(query.start_time, 1_700_000_000);
        assert!(query.interest_claimed);
    }
}
