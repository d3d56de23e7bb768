//! Boundary surface of the vault core.
//!
//! `VaultService` ties the store, the session slot, and the rate
//! limiter together and exposes the operations a UI or CLI layer calls:
//! unlock, lock, the secret CRUD set, master-password rotation, and
//! whole-vault export/import.
//!
//! All methods are blocking and the service is `Send + Sync`; the key
//! derivation inside unlock and rotation takes hundreds of
//! milliseconds, so interactive embedders should call from a worker
//! thread and await the result.

use std::path::{Path, PathBuf};

use crate::crypto::Argon2Params;
use crate::errors::Result;

use super::limiter::RateLimiter;
use super::secret::{Secret, SecretDraft};
use super::session::VaultSession;
use super::store::VaultStore;
use super::unlock;

/// Result of an unlock attempt.
///
/// `wait_time_ms` carries the current backoff on failure: informational
/// below the block threshold, the remaining cooldown while blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockOutcome {
    pub success: bool,
    pub wait_time_ms: Option<u64>,
}

/// One logical vault session: store + session key + attempt limiter.
pub struct VaultService {
    store: VaultStore,
    session: VaultSession,
    limiter: RateLimiter,
}

impl VaultService {
    /// Service over the vault file at `path` with default KDF parameters.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_store(VaultStore::new(path))
    }

    /// Service with explicit Argon2id parameters (weak values are for
    /// tests only).
    pub fn with_params(path: impl Into<PathBuf>, params: Argon2Params) -> Self {
        Self::from_store(VaultStore::with_params(path, params))
    }

    fn from_store(store: VaultStore) -> Self {
        Self {
            store,
            session: VaultSession::new(),
            limiter: RateLimiter::new(),
        }
    }

    /// The underlying store (path inspection, existence checks).
    pub fn store(&self) -> &VaultStore {
        &self.store
    }

    // ------------------------------------------------------------------
    // Unlock / lock
    // ------------------------------------------------------------------

    /// Attempt to unlock the vault, creating it on first run.
    ///
    /// Rate limiting is enforced before any cryptographic work: while a
    /// block is active the real unlock is never invoked.  On success
    /// the session key is installed and attempt state resets; on
    /// failure the backoff is reported in `wait_time_ms`.
    pub fn unlock(&self, password: &[u8]) -> UnlockOutcome {
        if let Some(wait) = self.limiter.blocked_wait_ms() {
            return UnlockOutcome {
                success: false,
                wait_time_ms: Some(wait),
            };
        }

        match unlock::unlock(&self.store, password) {
            Ok(key) => {
                self.session.set(key);
                self.limiter.record_success();
                UnlockOutcome {
                    success: true,
                    wait_time_ms: None,
                }
            }
            Err(_) => {
                let wait = self.limiter.record_failure();
                UnlockOutcome {
                    success: false,
                    wait_time_ms: Some(wait),
                }
            }
        }
    }

    /// Drop the session key (manual lock, auto-lock timeout, suspend…).
    pub fn lock(&self) {
        self.session.clear();
    }

    pub fn is_unlocked(&self) -> bool {
        self.session.is_unlocked()
    }

    /// Remaining cooldown if unlock attempts are currently blocked.
    /// The UI layer uses this to show a countdown instead of the
    /// generic wrong-password message.
    pub fn rate_limit_wait_ms(&self) -> Option<u64> {
        self.limiter.blocked_wait_ms()
    }

    // ------------------------------------------------------------------
    // Secret operations (require an unlocked session)
    // ------------------------------------------------------------------

    pub fn get_secrets(&self) -> Result<Vec<Secret>> {
        self.session.with_key(|key| self.store.read_secrets(key))
    }

    pub fn add_secret(&self, draft: SecretDraft) -> Result<Secret> {
        self.session.with_key(|key| self.store.add_secret(key, draft))
    }

    pub fn edit_secret(&self, updated: Secret) -> Result<()> {
        self.session
            .with_key(|key| self.store.edit_secret(key, updated))
    }

    pub fn delete_secret(&self, id: &str) -> Result<()> {
        self.session.with_key(|key| self.store.delete_secret(key, id))
    }

    // ------------------------------------------------------------------
    // Rotation
    // ------------------------------------------------------------------

    /// Change the master password. All-or-nothing: `false` means the
    /// on-disk record was left untouched (wrong old password, decrypt
    /// failure, or I/O error — deliberately not distinguished).  On
    /// success the live session switches to the new key, so the caller
    /// stays unlocked without re-authenticating.
    pub fn change_master_password(&self, old_password: &[u8], new_password: &[u8]) -> bool {
        match self.store.change_password(old_password, new_password) {
            Ok(new_key) => {
                self.session.set(new_key);
                true
            }
            Err(_) => false,
        }
    }

    // ------------------------------------------------------------------
    // Export / import
    // ------------------------------------------------------------------

    /// Copy the encrypted vault record to `dest`.
    pub fn export_vault(&self, dest: &Path) -> Result<()> {
        self.store.export_to(dest)
    }

    /// Replace the vault with the record at `src` and lock the session:
    /// the imported record answers to its own master password.
    pub fn import_vault(&self, src: &Path) -> Result<()> {
        self.store.import_from(src)?;
        self.session.clear();
        Ok(())
    }
}
