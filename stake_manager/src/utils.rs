//! Helpers shared across the canister:
//! - Access control
//! - Type casting at the Candid boundary

use candid::{Nat, Principal};

use crate::{
    error::{StakeError, StakeResult},
    state::ADMIN,
};

/// Returns Err if the `caller` is not the designated administrator
pub fn only_admin(caller: Principal) -> StakeResult<()> {
    let admin = ADMIN.with(|admin| admin.get());
    if caller != admin {
        // only the administrator may sweep the pool
        return Err(StakeError::Unauthorized);
    }
    Ok(())
}

/// Converts values of type `Nat` to `u128`
pub fn nat_to_u128(n: &Nat) -> StakeResult<u128> {
    u128::try_from(n.0.clone())
        .map_err(|err| StakeError::DecodingError(format!("Error converting Nat to u128: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_passes_the_access_check() {
        let admin = Principal::from_slice(&[7; 29]);
        ADMIN.with(|cell| cell.set(admin));
        assert!(only_admin(admin).is_ok());
    }

    #[test]
    fn non_admin_is_rejected() {
        let admin = Principal::from_slice(&[7; 29]);
        let stranger = Principal::from_slice(&[8; 29]);
        ADMIN.with(|cell| cell.set(admin));
        assert_eq!(only_admin(stranger), Err(StakeError::Unauthorized));
    }

    #[test]
    fn nat_to_u128_valid() {
        let nat = Nat::from(1_234_567_890_u64);
        assert_eq!(nat_to_u128(&nat).unwrap(), 1_234_567_890);
    }

    #[test]
    fn nat_to_u128_overflow() {
        let nat = Nat::from(u128::MAX) + Nat::from(1_u8);
        assert!(matches!(
            nat_to_u128(&nat),
            Err(StakeError::DecodingError(_))
        ));
    }
}
