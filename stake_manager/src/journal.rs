//! Operation journal persisted in stable memory.
//!
//! Every mutating endpoint commits one entry with its outcome, so the full
//! transaction history survives in the canister and can be queried.

use std::borrow::Cow;

use candid::{CandidType, Decode, Encode, Principal};
use ic_exports::ic_cdk::api::time;
use ic_stable_structures::{storable::Bound, Storable};
use serde::Deserialize;

use crate::{constants::JOURNAL_ENTRY_MAX_SIZE, error::StakeResult, state::insert_journal_entry};

/// Category of a journal entry
#[derive(Clone, CandidType, Deserialize)]
pub enum LogType {
    Info,
    Stake,
    Redeem,
    ClaimInterest,
    Sweep,
}

/// Journal entry
#[derive(Clone, CandidType, Deserialize)]
pub struct JournalEntry {
    pub timestamp: u64,
    pub entry: StakeResult<()>,
    pub log_type: LogType,
    pub account: Option<Principal>,
    pub note: Option<String>,
}

/// Builder for journal entries
impl JournalEntry {
    /// Create a new instance of a journal entry
    /// Fills the `timestamp`, `entry`, and `log_type` fields
    pub fn new(entry: StakeResult<()>, log_type: LogType) -> Self {
        Self {
            timestamp: time(),
            entry,
            log_type,
            account: None,
            note: None,
        }
    }

    /// Fills the `account` field of the entry
    pub fn account(&mut self, account: Principal) -> &mut Self {
        self.account = Some(account);
        self
    }

    /// Fills the `note` field of the entry
    pub fn note<S: AsRef<str>>(&mut self, text: S) -> &mut Self {
        self.note = Some(text.as_ref().to_string());
        self
    }

    /// Commits the entry to the stable storage vector
    pub fn commit(&mut self) {
        insert_journal_entry(self);
    }
}

impl Storable for JournalEntry {
    fn to_bytes(&self) -> Cow<[u8]> {
        Cow::Owned(Encode!(self).unwrap())
    }

    fn from_bytes(bytes: Cow<[u8]>) -> Self {
        Decode!(bytes.as_ref(), Self).unwrap()
    }

    const BOUND: Bound = Bound::Bounded {
        max_size: JOURNAL_ENTRY_MAX_SIZE,
        is_fixed_size: false,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StakeError;

    #[test]
    fn entries_survive_a_storable_round_trip() {
        let entry = JournalEntry {
            timestamp: 1_700_000_000,
            entry: Err(StakeError::NoInterest),
            log_type: LogType::ClaimInterest,
            account: Some(Principal::anonymous()),
            note: Some("claim attempt".to_string()),
        };

        let decoded = JournalEntry::from_bytes(entry.to_bytes());
        assert_eq!(decoded.timestamp, entry.timestamp);
        assert_eq!(decoded.entry, entry.entry);
        assert_eq!(decoded.account, entry.account);
        assert_eq!(decoded.note, entry.note);
    }
}
