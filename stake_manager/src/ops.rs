//! Transaction handlers over the position store and the external ledger.
//!
//! Every handler acquires the ledger-wide lock before touching state and
//! releases it on every exit path through the guard's drop. Ledger calls
//! are the only awaits, and the store is written only after they succeed,
//! so no invariant of the position store is observable in a violated state
//! while control is handed to another execution.

use candid::Principal;

use crate::{
    error::{arithmetic_err, StakeError, StakeResult},
    interest,
    ledger::Ledger,
    lock::LockGuard,
    position::Position,
    state,
    utils::only_admin,
};

/// Stakes `deposit` for `account`, settling any prior window first.
///
/// An existing position is paid out with a single combined transfer of its
/// principal plus accrued interest before the new deposit is pulled in, so
/// the old window settles atomically in one external call. The position is
/// rewritten only after both transfers succeed and always starts a fresh
/// accrual window, discarding any partial prior state.
pub async fn stake<L: Ledger>(
    ledger: &L,
    account: Principal,
    deposit: u128,
    now_s: u64,
) -> StakeResult<()> {
    let _guard = LockGuard::acquire()?;

    if deposit == 0 {
        return Err(StakeError::InvalidAmount);
    }

    if let Some(existing) = state::get_position(&account) {
        if existing.amount > 0 {
            let accrued = interest::accrued(&existing, now_s)?;
            let payout = existing
                .amount
                .checked_add(accrued)
                .ok_or_else(|| arithmetic_err("Restake payout overflowed."))?;
            ledger.transfer(account, payout).await?;
        }
    }

    ledger.transfer_from(account, deposit).await?;

    state::commit_position(account, Position::open(deposit, now_s));
    Ok(())
}

/// Redeems `amount` of `account`'s staked principal.
///
/// Any redemption, partial or full, forfeits the unclaimed interest of the
/// current window: `interest_claimed` is set unconditionally. There is no
/// partial-redeem-without-forfeiture path. A full redemption removes the
/// position from the store.
pub async fn redeem<L: Ledger>(ledger: &L, account: Principal, amount: u128) -> StakeResult<()> {
    let _guard = LockGuard::acquire()?;

    if amount == 0 {
        return Err(StakeError::InvalidAmount);
    }

    // A missing entry is a zero-amount position.
    let mut position = state::get_position(&account).unwrap_or_default();
    if amount > position.amount {
        return Err(StakeError::InsufficientStake);
    }

    position.amount -= amount;
    position.interest_claimed = true;

    ledger.transfer(account, amount).await?;

    // Committed only once the transfer has succeeded.
    if position.amount == 0 {
        state::remove_position(&account);
    } else {
        state::commit_position(account, position);
    }
    Ok(())
}

/// Pays out the interest accrued by `account`'s current window.
///
/// The principal is untouched and the window is not reset: once marked
/// claimed, the window accrues nothing further until a new stake opens a
/// fresh one.
pub async fn claim_interest<L: Ledger>(
    ledger: &L,
    account: Principal,
    now_s: u64,
) -> StakeResult<()> {
    let _guard = LockGuard::acquire()?;

    let mut position = state::get_position(&account).ok_or(StakeError::NoInterest)?;
    let accrued = interest::accrued(&position, now_s)?;
    if accrued == 0 {
        return Err(StakeError::NoInterest);
    }

    position.interest_claimed = true;

    ledger.transfer(account, accrued).await?;

    state::commit_position(account, position);
    Ok(())
}

/// Transfers the entire pool balance to the administrator and returns the
/// swept amount.
///
/// Operationally dangerous by design: the pool is shared across all
/// accounts, so a sweep can leave it insolvent and make later redemptions
/// and interest claims fail at the transfer step. That risk is an accepted
/// property of the pooled-balance layout, not something this handler
/// guards against.
pub async fn sweep<L: Ledger>(ledger: &L, caller: Principal) -> StakeResult<u128> {
    only_admin(caller)?;

    let _guard = LockGuard::acquire()?;

    let balance = ledger.pool_balance().await?;
    ledger.transfer(caller, balance).await?;
    Ok(balance)
}
