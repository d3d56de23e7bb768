//! In-memory session key lifecycle.
//!
//! A single slot holds the current master key between a successful
//! unlock and the next clear event (manual lock, inactivity timeout,
//! OS lock/suspend, minimize, quit — the embedder decides when).  The
//! key is never persisted; clearing the slot drops the `MasterKey`,
//! which zeroizes its bytes.

use std::sync::{Mutex, MutexGuard};

use crate::crypto::MasterKey;
use crate::errors::{PassVaultError, Result};

/// Holder of the current unlocked key, or empty when locked.
///
/// An explicitly constructed value passed to whoever needs it — not a
/// process-wide global — so tests and multiple logical sessions stay
/// isolated.
#[derive(Default)]
pub struct VaultSession {
    slot: Mutex<Option<MasterKey>>,
}

impl VaultSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a key after a successful unlock, creation, or rotation.
    /// Replaces (and thereby zeroizes) any previous key.
    pub fn set(&self, key: MasterKey) {
        *self.lock() = Some(key);
    }

    /// Drop the current key, returning the session to the locked state.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    /// Returns `true` while a key is installed.
    pub fn is_unlocked(&self) -> bool {
        self.lock().is_some()
    }

    /// Run `f` with the current key, or fail with `VaultLocked`.
    ///
    /// The key never leaves the slot; the closure borrows it for the
    /// duration of one operation.
    pub fn with_key<T>(&self, f: impl FnOnce(&MasterKey) -> Result<T>) -> Result<T> {
        let guard = self.lock();
        match guard.as_ref() {
            Some(key) => f(key),
            None => Err(PassVaultError::VaultLocked),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<MasterKey>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_locked() {
        let session = VaultSession::new();
        assert!(!session.is_unlocked());
        let result = session.with_key(|_| Ok(()));
        assert!(matches!(result, Err(PassVaultError::VaultLocked)));
    }

    #[test]
    fn set_then_with_key_sees_the_key() {
        let session = VaultSession::new();
        session.set(MasterKey::new([0x42; 32]));
        assert!(session.is_unlocked());

        let first_byte = session.with_key(|key| Ok(key.as_bytes()[0])).unwrap();
        assert_eq!(first_byte, 0x42);
    }

    #[test]
    fn clear_locks_again() {
        let session = VaultSession::new();
        session.set(MasterKey::new([1; 32]));
        session.clear();

        assert!(!session.is_unlocked());
        assert!(session.with_key(|_| Ok(())).is_err());
    }

    #[test]
    fn set_replaces_previous_key() {
        let session = VaultSession::new();
        session.set(MasterKey::new([1; 32]));
        session.set(MasterKey::new([2; 32]));

        let first_byte = session.with_key(|key| Ok(key.as_bytes()[0])).unwrap();
        assert_eq!(first_byte, 2);
    }
}
