use candid::CandidType;
use serde::Deserialize;

/// Staking canister result
pub type StakeResult<T> = Result<T, StakeError>;

/// Staking canister errors
#[derive(Clone, CandidType, Debug, Deserialize, PartialEq)]
pub enum StakeError {
    /// Zero or otherwise unusable amount requested
    InvalidAmount,
    /// Redemption exceeds the currently staked principal
    InsufficientStake,
    /// Claim attempted while no interest has accrued
    NoInterest,
    /// The ledger rejected or failed a transfer
    TransferFailed(String),
    /// A mutating call is already in flight for this ledger
    Reentrancy,
    /// Caller is not the designated administrator
    Unauthorized,
    /// The current time precedes the recorded window start
    InvalidTime,
    /// Arithmetic error
    Arithmetic(String),
    /// Decoding issue
    DecodingError(String),
}

pub fn arithmetic_err<S: AsRef<str>>(s: S) -> StakeError {
    StakeError::Arithmetic(format!("{:#?}", s.as_ref()))
}
