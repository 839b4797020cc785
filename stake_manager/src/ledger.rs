//! The external asset-transfer collaborator: an ICRC ledger canister that
//! moves the pooled asset between accounts and the pool.
//!
//! The pool is the canister's own ledger account. Handlers depend on the
//! `Ledger` trait rather than the concrete client so the transaction logic
//! can be exercised against a mock.

use candid::{Nat, Principal};
use ic_exports::{
    ic_cdk::{api::call::CallResult, call},
    ic_kit::ic::id,
};
use icrc_ledger_types::{
    icrc1::{
        account::Account,
        transfer::{TransferArg, TransferError},
    },
    icrc2::transfer_from::{TransferFromArgs, TransferFromError},
};

use crate::{
    error::{StakeError, StakeResult},
    utils::nat_to_u128,
};

/// External asset-transfer service consumed by the transaction handlers.
///
/// All three calls are fallible; a failure aborts the enclosing handler
/// before any position mutation is committed.
#[cfg_attr(test, mockall::automock)]
pub trait Ledger {
    /// Moves `amount` from the pool to `to`.
    async fn transfer(&self, to: Principal, amount: u128) -> StakeResult<()>;
    /// Pulls `amount` from `from` into the pool.
    async fn transfer_from(&self, from: Principal, amount: u128) -> StakeResult<()>;
    /// Reports the pooled balance held by this canister.
    async fn pool_balance(&self) -> StakeResult<u128>;
}

/// Ledger client backed by inter-canister calls to the configured ICRC ledger
#[derive(Clone)]
pub struct LedgerClient(pub Principal);

impl LedgerClient {
    fn pool_account() -> Account {
        Account {
            owner: id(),
            subaccount: None,
        }
    }
}

impl Ledger for LedgerClient {
    async fn transfer(&self, to: Principal, amount: u128) -> StakeResult<()> {
        let args = TransferArg {
            from_subaccount: None,
            to: Account {
                owner: to,
                subaccount: None,
            },
            fee: None,
            created_at_time: None,
            memo: None,
            amount: Nat::from(amount),
        };

        let call_result: CallResult<(Result<Nat, TransferError>,)> =
            call(self.0, "icrc1_transfer", (args,)).await;
        extract_transfer_result(call_result)
    }

    async fn transfer_from(&self, from: Principal, amount: u128) -> StakeResult<()> {
        let args = TransferFromArgs {
            spender_subaccount: None,
            from: Account {
                owner: from,
                subaccount: None,
            },
            to: Self::pool_account(),
            amount: Nat::from(amount),
            fee: None,
            memo: None,
            created_at_time: None,
        };

        let call_result: CallResult<(Result<Nat, TransferFromError>,)> =
            call(self.0, "icrc2_transfer_from", (args,)).await;
        extract_transfer_result(call_result)
    }

    async fn pool_balance(&self) -> StakeResult<u128> {
        let call_result: CallResult<(Nat,)> =
            call(self.0, "icrc1_balance_of", (Self::pool_account(),)).await;

        match call_result {
            Ok((balance,)) => nat_to_u128(&balance),
            Err((code, message)) => Err(StakeError::TransferFailed(format!(
                "{:?}: {}",
                code, message
            ))),
        }
    }
}

/// Flattens the two failure layers of a ledger transfer call (call rejection
/// and ledger-side error) into `TransferFailed`.
fn extract_transfer_result<E: std::fmt::Debug>(
    result: CallResult<(Result<Nat, E>,)>,
) -> StakeResult<()> {
    match result {
        Ok((Ok(_block_index),)) => Ok(()),
        Ok((Err(err),)) => Err(StakeError::TransferFailed(format!("{:?}", err))),
        Err((code, message)) => Err(StakeError::TransferFailed(format!(
            "{:?}: {}",
            code, message
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ic_exports::ic_cdk::api::call::RejectionCode;

    #[test]
    fn successful_transfers_flatten_to_ok() {
        let result: CallResult<(Result<Nat, TransferError>,)> = Ok((Ok(Nat::from(3_u8)),));
        assert_eq!(extract_transfer_result(result), Ok(()));
    }

    #[test]
    fn ledger_side_errors_flatten_to_transfer_failed() {
        let result: CallResult<(Result<Nat, TransferError>,)> = Ok((Err(
            TransferError::InsufficientFunds {
                balance: Nat::from(0_u8),
            },
        ),));
        assert!(matches!(
            extract_transfer_result(result),
            Err(StakeError::TransferFailed(_))
        ));
    }

    #[test]
    fn call_rejections_flatten_to_transfer_failed() {
        let result: CallResult<(Result<Nat, TransferError>,)> = Err((
            RejectionCode::CanisterReject,
            "ledger unavailable".to_string(),
        ));
        assert!(matches!(
            extract_transfer_result(result),
            Err(StakeError::TransferFailed(_))
        ));
    }
}
