mod canister;
mod constants;
mod error;
mod interest;
mod journal;
mod ledger;
mod lock;
mod ops;
mod position;
mod state;
mod utils;

pub use canister::StakeManager;
