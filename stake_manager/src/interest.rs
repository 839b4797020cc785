//! Pure interest accrual over a position.
//!
//! Interest is a truncating percentage of the staked principal, picked by
//! the age of the current accrual window:
//!
//! ```plain
//! window age         interest
//! ------------------ -----------------
//! < 1 day            0
//! [1 day, 7 days)    amount * 1 / 100
//! >= 7 days          amount * 10 / 100
//! ```
//!
//! A window yields interest at most once: a claimed (or forfeited) window
//! accrues nothing until a new stake resets it.

use crate::{
    constants::{full_rate_period_s, min_accrual_period_s, BASE_RATE_PERCENT, FULL_RATE_PERCENT},
    error::{arithmetic_err, StakeError, StakeResult},
    position::Position,
};

/// Returns the interest accrued by `position` as of `now_s` (seconds).
///
/// Deterministic and side-effect free. Fails with `InvalidTime` if the
/// current time precedes the recorded window start.
pub fn accrued(position: &Position, now_s: u64) -> StakeResult<u128> {
    if position.amount == 0 || position.interest_claimed {
        return Ok(0);
    }

    if now_s < position.start_time {
        return Err(StakeError::InvalidTime);
    }

    let duration = now_s - position.start_time;
    if duration < min_accrual_period_s() {
        return Ok(0);
    }

    let percent = if duration >= full_rate_period_s() {
        FULL_RATE_PERCENT
    } else {
        BASE_RATE_PERCENT
    };

    position
        .amount
        .checked_mul(percent)
        .ok_or_else(|| arithmetic_err("Interest multiplication overflowed."))
        .map(|scaled| scaled / 100)
}
