//! Ledger-Wide Locking System
//!
//! A fail-fast locking mechanism that prevents reentrant execution of the
//! mutating operations. Inter-canister transfer calls hand control to other
//! executions of this canister, so every handler holds the lock across its
//! ledger awaits. Re-entry while the lock is held is a hard `Reentrancy`
//! failure, never a blocking wait.
//!
//! ```plain
//! Lock State Machine:
//!
//!                   ┌──────────┐
//!              ┌────► Unlocked │
//!              │    └──────────┘
//!              │         │
//!  Guard Drop  │      try_lock
//!              │         │
//!              │         ▼
//!              │    ┌─────────┐
//!              └────┤ Locked  │
//!                   └─────────┘
//! ```

use crate::{
    error::{StakeError, StakeResult},
    state::LOCK,
};

/// Runtime lock guarding all mutating operations of the ledger.
#[derive(Clone, Default)]
pub struct Lock {
    /// Current lock state
    is_locked: bool,
}

impl Lock {
    /// Attempts to acquire the lock.
    ///
    /// # Returns
    /// * `Ok(())` - Lock successfully acquired
    /// * `Err(StakeError::Reentrancy)` - Lock unavailable
    pub fn try_lock(&mut self) -> StakeResult<()> {
        if self.is_locked {
            return Err(StakeError::Reentrancy);
        }
        self.is_locked = true;
        Ok(())
    }

    /// Releases the lock.
    pub fn unlock(&mut self) {
        self.is_locked = false;
    }

    /// Current lock state
    pub fn is_locked(&self) -> bool {
        self.is_locked
    }
}

/// Scoped acquisition of the ledger-wide lock.
///
/// The lock is released when the guard goes out of scope, covering success,
/// error, and early-return paths alike.
pub struct LockGuard(());

impl LockGuard {
    /// Acquires the ledger-wide lock or fails with `Reentrancy`.
    pub fn acquire() -> StakeResult<LockGuard> {
        LOCK.with(|lock| lock.borrow_mut().try_lock())?;
        Ok(LockGuard(()))
    }
}

impl Drop for LockGuard {
    /// Unlocks the ledger when the guard goes out of scope
    fn drop(&mut self) {
        LOCK.with(|lock| lock.borrow_mut().unlock());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_lock_attempt_is_rejected() {
        let mut lock = Lock::default();
        assert!(lock.try_lock().is_ok());
        assert_eq!(lock.try_lock(), Err(StakeError::Reentrancy));
    }

    #[test]
    fn unlock_allows_reacquisition() {
        let mut lock = Lock::default();
        lock.try_lock().unwrap();
        lock.unlock();
        assert!(lock.try_lock().is_ok());
    }

    #[test]
    fn guard_holds_and_releases_on_drop() {
        {
            let _guard = LockGuard::acquire().unwrap();
            assert_eq!(
                LockGuard::acquire().map(|_| ()),
                Err(StakeError::Reentrancy)
            );
        }
        // The guard is out of scope, the lock must be free again.
        assert!(LockGuard::acquire().is_ok());
    }
}
