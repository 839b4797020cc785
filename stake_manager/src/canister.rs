//! Candid endpoints of the staking canister.
//!
//! The shell stays thin: it resolves the caller and the current time,
//! delegates to the transaction handlers, and journals every mutating
//! call's outcome.

use candid::{Nat, Principal};
use ic_canister::{generate_idl, init, query, update, Canister, Idl, PreUpdate};
use ic_exports::{ic_cdk::api::time, ic_kit::ic::caller};

use crate::{
    error::StakeResult,
    interest,
    journal::{JournalEntry, LogType},
    ledger::LedgerClient,
    ops,
    position::PositionQuery,
    state::{self, ADMIN, JOURNAL, LEDGER},
    utils::nat_to_u128,
};

#[derive(Canister)]
pub struct StakeManager {
    #[id]
    id: Principal,
}

impl PreUpdate for StakeManager {}

impl StakeManager {
    /// Fixes the pooled-asset ledger and the administrator for the lifetime
    /// of the canister.
    #[init]
    pub fn init(&mut self, ledger: Principal, admin: Principal) {
        LEDGER.with(|cell| cell.set(ledger));
        ADMIN.with(|cell| cell.set(admin));

        JournalEntry::new(Ok(()), LogType::Info)
            .note(format!(
                "Canister initialized with ledger {} and admin {}.",
                ledger, admin
            ))
            .commit();
    }

    /// Stakes `amount` for the caller, settling any prior window with a
    /// single combined payout first.
    #[update]
    pub async fn stake(&self, amount: Nat) -> StakeResult<()> {
        let account = caller();
        let result = match nat_to_u128(&amount) {
            Ok(deposit) => ops::stake(&ledger_client(), account, deposit, now_s()).await,
            Err(err) => Err(err),
        };

        JournalEntry::new(result.clone(), LogType::Stake)
            .account(account)
            .note(format!("Stake of {} requested.", amount))
            .commit();
        result
    }

    /// Redeems `amount` of the caller's staked principal, forfeiting any
    /// unclaimed interest of the current window.
    #[update]
    pub async fn redeem(&self, amount: Nat) -> StakeResult<()> {
        let account = caller();
        let result = match nat_to_u128(&amount) {
            Ok(withdrawal) => ops::redeem(&ledger_client(), account, withdrawal).await,
            Err(err) => Err(err),
        };

        JournalEntry::new(result.clone(), LogType::Redeem)
            .account(account)
            .note(format!("Redemption of {} requested.", amount))
            .commit();
        result
    }

    /// Pays out the interest accrued by the caller's current window.
    #[update]
    pub async fn claim_interest(&self) -> StakeResult<()> {
        let account = caller();
        let result = ops::claim_interest(&ledger_client(), account, now_s()).await;

        JournalEntry::new(result.clone(), LogType::ClaimInterest)
            .account(account)
            .commit();
        result
    }

    /// Transfers the entire pool balance to the administrator. Admin only.
    #[update]
    pub async fn sweep(&self) -> StakeResult<Nat> {
        let account = caller();
        let result = ops::sweep(&ledger_client(), account).await;

        JournalEntry::new(result.clone().map(|_| ()), LogType::Sweep)
            .account(account)
            .note("Pool sweep requested.")
            .commit();
        result.map(Nat::from)
    }

    /// Returns the position recorded for `account`, if one exists.
    #[query]
    pub fn get_position(&self, account: Principal) -> Option<PositionQuery> {
        state::get_position(&account).map(PositionQuery::from)
    }

    /// Returns the interest `account` would receive if it claimed now.
    #[query]
    pub fn accrued_interest(&self, account: Principal) -> StakeResult<Nat> {
        match state::get_position(&account) {
            Some(position) => interest::accrued(&position, now_s()).map(Nat::from),
            None => Ok(Nat::from(0_u8)),
        }
    }

    /// Returns the full operation journal.
    #[query]
    pub fn get_journal(&self) -> Vec<JournalEntry> {
        JOURNAL.with(|journal| journal.borrow().iter().collect())
    }

    pub fn idl() -> Idl {
        generate_idl!()
    }
}

fn ledger_client() -> LedgerClient {
    LedgerClient(LEDGER.with(|cell| cell.get()))
}

/// Current IC time in seconds
fn now_s() -> u64 {
    time() / 1_000_000_000
}
