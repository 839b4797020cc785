//! Generates the candid file automatically

use stake_manager::StakeManager;

fn main() {
    let canister_e_idl = StakeManager::idl();
    let idl = candid::pretty::candid::compile(&canister_e_idl.env.env, &Some(canister_e_idl.actor));

    println!("{}", idl);
}
