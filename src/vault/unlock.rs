//! Verifier-based unlock protocol.
//!
//! State machine:
//!   NoVault     --create--> Unlocked
//!   VaultExists --verify--> Unlocked | Locked(failed)
//!
//! Unlocking a missing vault is first-run setup: the offered password
//! becomes the master password.  For an existing vault, a candidate key
//! is derived from the stored salt and proven correct by opening the
//! verifier — no password is ever stored or compared.

use crate::crypto::MasterKey;
use crate::errors::{PassVaultError, Result};

use super::store::VaultStore;

/// Unlock the vault with `password`, creating it on first run.
///
/// Every failure — wrong password, tampered record, unreadable file —
/// collapses into the single `UnlockFailed` variant.  The caller learns
/// that the unlock failed and nothing else, so the unlock path cannot
/// be used as an oracle for file integrity.
pub fn unlock(store: &VaultStore, password: &[u8]) -> Result<MasterKey> {
    let outcome = if store.exists() {
        store.verify_password(password)
    } else {
        store.create(password)
    };

    outcome.map_err(|_| PassVaultError::UnlockFailed)
}
