//! Canister state: the position store, configuration, the ledger-wide lock,
//! and the stable journal.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use ic_exports::candid::Principal;
use ic_stable_structures::{
    memory_manager::{MemoryId, MemoryManager, VirtualMemory},
    DefaultMemoryImpl, StableVec,
};

use crate::{journal::JournalEntry, lock::Lock, position::Position};

type Memory = VirtualMemory<DefaultMemoryImpl>;

thread_local! {
    /// Position store: one entry per account, absence means a zero-amount position
    pub static POSITIONS: RefCell<HashMap<Principal, Position>> = RefCell::new(HashMap::new());
    /// Principal of the ICRC ledger holding the pooled asset
    pub static LEDGER: Cell<Principal> = Cell::new(Principal::anonymous());
    /// Designated administrator, the only principal allowed to sweep the pool
    pub static ADMIN: Cell<Principal> = Cell::new(Principal::anonymous());
    /// Reentrancy lock shared by all mutating operations of the ledger
    pub static LOCK: RefCell<Lock> = RefCell::new(Lock::default());

    static MEMORY_MANAGER: RefCell<MemoryManager<DefaultMemoryImpl>> =
        RefCell::new(MemoryManager::init(DefaultMemoryImpl::default()));
    /// Operation journal kept in stable memory
    pub static JOURNAL: RefCell<StableVec<JournalEntry, Memory>> = RefCell::new(
        StableVec::init(MEMORY_MANAGER.with(|mm| mm.borrow().get(MemoryId::new(0))))
            .expect("the journal memory could not be initialized"),
    );
}

/// Returns the position recorded for `account`, if any.
pub fn get_position(account: &Principal) -> Option<Position> {
    POSITIONS.with(|positions| positions.borrow().get(account).cloned())
}

/// Overwrites the position recorded for `account`.
pub fn commit_position(account: Principal, position: Position) {
    POSITIONS.with(|positions| {
        positions.borrow_mut().insert(account, position);
    });
}

/// Removes the position recorded for `account`.
pub fn remove_position(account: &Principal) {
    POSITIONS.with(|positions| {
        positions.borrow_mut().remove(account);
    });
}

/// Appends an entry to the stable journal.
pub fn insert_journal_entry(entry: &JournalEntry) {
    JOURNAL.with(|journal| {
        let _ = journal.borrow_mut().push(entry);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_entries_read_as_none() {
        assert!(get_position(&Principal::anonymous()).is_none());
    }

    #[test]
    fn commit_then_remove_round_trip() {
        let account = Principal::anonymous();
        commit_position(account, Position::open(250, 7));

        let stored = get_position(&account).unwrap();
        assert_eq!(stored.amount, 250);
        assert_eq!(stored.start_time, 7);

        remove_position(&account);
        assert!(get_position(&account).is_none());
    }
}
