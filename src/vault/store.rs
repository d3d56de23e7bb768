//! High-level vault operations over the on-disk record.
//!
//! `VaultStore` owns the path to the vault file and the KDF parameters
//! for this installation.  Every public method is a full
//! read-modify-write cycle over the whole secret collection under the
//! current key — there is no incremental per-record encryption.  A
//! single writer lock serializes those cycles so reads, writes, and
//! rotation never interleave (one user, one process).

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::crypto::cipher;
use crate::crypto::kdf::{self, Argon2Params};
use crate::crypto::MasterKey;
use crate::errors::{PassVaultError, Result};

use super::record::{self, VaultRecord, VERIFIER_PLAINTEXT};
use super::secret::{Secret, SecretDraft};

/// Handle to one vault installation on disk.
pub struct VaultStore {
    /// Path to the vault JSON file.
    path: PathBuf,

    /// Argon2id parameters for this store. Not stored in the record,
    /// so the same params must be used for create and every open.
    params: Argon2Params,

    /// Serializes all read-modify-write cycles.
    io_lock: Mutex<()>,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a store handle with the default Argon2id parameters.
    ///
    /// This does not touch the filesystem; call `create` or one of the
    /// read operations to do that.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_params(path, Argon2Params::default())
    }

    /// Create a store handle with explicit Argon2id parameters.
    pub fn with_params(path: impl Into<PathBuf>, params: Argon2Params) -> Self {
        Self {
            path: path.into(),
            params,
            io_lock: Mutex::new(()),
        }
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if a vault file exists at this store's path.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    // ------------------------------------------------------------------
    // Creation and password verification
    // ------------------------------------------------------------------

    /// Create a brand-new vault file.
    ///
    /// Generates a fresh 16-byte salt, derives the master key from the
    /// password, seals the verifier constant under it, and persists a
    /// record with no secrets.  Called once per installation.
    pub fn create(&self, password: &[u8]) -> Result<MasterKey> {
        let _guard = self.lock();

        if self.path.exists() {
            return Err(PassVaultError::VaultAlreadyExists(self.path.clone()));
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let salt = kdf::generate_salt();
        let key = self.derive(password, &salt)?;
        let verifier = cipher::seal(key.as_bytes(), VERIFIER_PLAINTEXT)?;

        let record = VaultRecord {
            salt: salt.to_vec(),
            verifier,
            secrets: Vec::new(),
            secrets_encrypted: None,
        };
        record::write_record(&self.path, &record)?;

        Ok(key)
    }

    /// Derive a candidate key from `password` and the stored salt, and
    /// prove it correct against the verifier.
    ///
    /// Errors stay detailed here (not-found vs corrupt vs wrong key);
    /// the unlock protocol flattens them before they leave the core.
    pub fn verify_password(&self, password: &[u8]) -> Result<MasterKey> {
        let _guard = self.lock();

        let record = record::read_record(&self.path)?;
        let key = self.derive(password, &record.salt)?;
        Self::check_verifier(&key, &record)?;
        Ok(key)
    }

    // ------------------------------------------------------------------
    // Secret operations
    // ------------------------------------------------------------------

    /// Decrypt and return the full secret collection.
    ///
    /// A vault that has never stored secrets yields an empty collection.
    /// A record predating envelope encryption yields its legacy
    /// plaintext array.
    pub fn read_secrets(&self, key: &MasterKey) -> Result<Vec<Secret>> {
        let _guard = self.lock();

        let record = record::read_record(&self.path)?;
        Self::decrypt_secrets(key, &record)
    }

    /// Seal `secrets` under `key` with a fresh nonce and atomically
    /// overwrite the persisted blob.  The legacy plaintext array is
    /// emptied by the same write.
    pub fn write_secrets(&self, key: &MasterKey, secrets: &[Secret]) -> Result<()> {
        let _guard = self.lock();

        let mut record = record::read_record(&self.path)?;
        self.store_secrets(&mut record, key, secrets)
    }

    /// Insert a new secret. Assigns a fresh id and sets both timestamps
    /// to now. Returns the stored record.
    pub fn add_secret(&self, key: &MasterKey, draft: SecretDraft) -> Result<Secret> {
        let _guard = self.lock();

        let mut record = record::read_record(&self.path)?;
        let mut secrets = Self::decrypt_secrets(key, &record)?;

        let secret = draft.into_secret();
        secrets.push(secret.clone());
        self.store_secrets(&mut record, key, &secrets)?;

        Ok(secret)
    }

    /// Replace the secret whose id matches `updated.id`, refreshing its
    /// last-accessed timestamp.  Fails with `SecretNotFound` when no
    /// record carries that id.
    pub fn edit_secret(&self, key: &MasterKey, updated: Secret) -> Result<()> {
        let _guard = self.lock();

        let mut record = record::read_record(&self.path)?;
        let mut secrets = Self::decrypt_secrets(key, &record)?;

        let slot = secrets
            .iter_mut()
            .find(|s| s.id == updated.id)
            .ok_or_else(|| PassVaultError::SecretNotFound(updated.id.clone()))?;

        *slot = Secret {
            last_accessed: Utc::now(),
            ..updated
        };

        self.store_secrets(&mut record, key, &secrets)
    }

    /// Remove the secret with the given id.  Idempotent: a missing id
    /// is a no-op, not an error.
    pub fn delete_secret(&self, key: &MasterKey, id: &str) -> Result<()> {
        let _guard = self.lock();

        let mut record = record::read_record(&self.path)?;
        let mut secrets = Self::decrypt_secrets(key, &record)?;

        secrets.retain(|s| s.id != id);
        self.store_secrets(&mut record, key, &secrets)
    }

    // ------------------------------------------------------------------
    // Master-password rotation
    // ------------------------------------------------------------------

    /// Atomically replace the master password.
    ///
    /// Verifies the old password, decrypts the secret collection with
    /// the old key, re-seals verifier and secrets under a new salt and
    /// key, and persists everything as one temp-file + rename write.
    /// Any failure at any step leaves the previous record fully intact;
    /// there is no partial-success outcome.
    pub fn change_password(&self, old_password: &[u8], new_password: &[u8]) -> Result<MasterKey> {
        let _guard = self.lock();

        // 1. Verify the old password against the current verifier.
        let record = record::read_record(&self.path)?;
        let old_key = self.derive(old_password, &record.salt)?;
        Self::check_verifier(&old_key, &record)?;

        // 2. Decrypt the existing secret blob, if any.
        let plaintext_secrets = match &record.secrets_encrypted {
            Some(blob) => Some(cipher::open(old_key.as_bytes(), blob)?),
            None => None,
        };

        // 3. New salt, new key, fresh nonces for verifier and secrets.
        let new_salt = kdf::generate_salt();
        let new_key = self.derive(new_password, &new_salt)?;

        let secrets_encrypted = match plaintext_secrets {
            Some(mut plaintext) => {
                let sealed = cipher::seal(new_key.as_bytes(), &plaintext);
                plaintext.zeroize();
                Some(sealed?)
            }
            None => None,
        };

        let new_record = VaultRecord {
            salt: new_salt.to_vec(),
            verifier: cipher::seal(new_key.as_bytes(), VERIFIER_PLAINTEXT)?,
            secrets: record.secrets,
            secrets_encrypted,
        };

        // 4. One atomic swap — the file is never observable mixing old
        //    and new key material.
        record::write_record(&self.path, &new_record)?;

        Ok(new_key)
    }

    // ------------------------------------------------------------------
    // Whole-record export / import
    // ------------------------------------------------------------------

    /// Copy the serialized vault record to `dest` as-is (still encrypted).
    pub fn export_to(&self, dest: &Path) -> Result<()> {
        let _guard = self.lock();

        if !self.path.exists() {
            return Err(PassVaultError::VaultNotFound(self.path.clone()));
        }
        let data = std::fs::read(&self.path)?;
        std::fs::write(dest, data)?;
        Ok(())
    }

    /// Replace this vault with the record at `src`.
    ///
    /// The incoming file must parse as a vault record; it is then
    /// written atomically over the current one.  The imported record
    /// answers to its own master password, so callers must drop any
    /// live session key afterwards.
    pub fn import_from(&self, src: &Path) -> Result<()> {
        let _guard = self.lock();

        let data = std::fs::read(src)?;
        let incoming: VaultRecord = serde_json::from_slice(&data)
            .map_err(|e| PassVaultError::InvalidVaultFormat(format!("imported vault: {e}")))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        record::write_record(&self.path, &incoming)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Acquire the single-writer lock, recovering from poisoning (the
    /// on-disk record is only ever mutated by one atomic rename, so a
    /// panicked holder cannot have left it torn).
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.io_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run the KDF and wrap the result, wiping the intermediate buffer.
    fn derive(&self, password: &[u8], salt: &[u8]) -> Result<MasterKey> {
        let mut bytes = kdf::derive_key_with_params(password, salt, &self.params)?;
        let key = MasterKey::new(bytes);
        bytes.zeroize();
        Ok(key)
    }

    /// Open the verifier under `key` and compare the plaintext against
    /// the fixed constant in constant time.
    fn check_verifier(key: &MasterKey, record: &VaultRecord) -> Result<()> {
        let mut plaintext = cipher::open(key.as_bytes(), &record.verifier)?;
        let matches: bool = plaintext.ct_eq(VERIFIER_PLAINTEXT).into();
        plaintext.zeroize();

        if matches {
            Ok(())
        } else {
            Err(PassVaultError::DecryptionFailed)
        }
    }

    /// Decrypt the secret collection from a loaded record.
    fn decrypt_secrets(key: &MasterKey, record: &VaultRecord) -> Result<Vec<Secret>> {
        match &record.secrets_encrypted {
            Some(blob) => {
                let mut plaintext = cipher::open(key.as_bytes(), blob)?;
                let secrets = serde_json::from_slice(&plaintext).map_err(|e| {
                    PassVaultError::SerializationError(format!("secret collection: {e}"))
                });
                plaintext.zeroize();
                secrets
            }
            // Legacy records carried secrets in the clear.
            None => Ok(record.secrets.clone()),
        }
    }

    /// Seal `secrets` into the record and persist it atomically.
    fn store_secrets(
        &self,
        record: &mut VaultRecord,
        key: &MasterKey,
        secrets: &[Secret],
    ) -> Result<()> {
        let mut plaintext = serde_json::to_vec(secrets)
            .map_err(|e| PassVaultError::SerializationError(format!("secret collection: {e}")))?;
        let sealed = cipher::seal(key.as_bytes(), &plaintext);
        plaintext.zeroize();

        record.secrets_encrypted = Some(sealed?);
        record.secrets.clear();
        record::write_record(&self.path, record)
    }
}
