//! Staking canister constants

use chrono::Duration;

/// Window age below which no interest accrues
const MIN_ACCRUAL_DAYS: i64 = 1;
pub fn min_accrual_period_s() -> u64 {
    Duration::days(MIN_ACCRUAL_DAYS).num_seconds() as u64
}

/// Window age at which the full rate starts to apply
const FULL_RATE_DAYS: i64 = 7;
pub fn full_rate_period_s() -> u64 {
    Duration::days(FULL_RATE_DAYS).num_seconds() as u64
}

/// Interest percentage for windows between one and seven days old
pub const BASE_RATE_PERCENT: u128 = 1;

/// Interest percentage for windows at least seven days old
pub const FULL_RATE_PERCENT: u128 = 10;

/// Upper bound on the serialized size of one journal entry
pub const JOURNAL_ENTRY_MAX_SIZE: u32 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_accrual_period_is_one_day() {
        assert_eq!(min_accrual_period_s(), 86_400);
    }

    #[test]
    fn full_rate_period_is_seven_days() {
        assert_eq!(full_rate_period_s(), 7 * min_accrual_period_s());
    }
}
