//! AES-256-GCM authenticated encryption.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `open` splits the nonce back out
//! before decrypting and verifies the authentication tag.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{PassVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext || tag).
pub fn seal(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Fresh random nonce per call; reuse under the same key would break GCM.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    // Single blob: nonce first, then ciphertext + tag.
    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt a blob that was produced by `seal`.
///
/// Fails closed: truncated input, a flipped bit anywhere in the blob,
/// or the wrong key all yield `DecryptionFailed` — never partial or
/// garbage plaintext.
pub fn open(key: &[u8], blob: &[u8]) -> Result<Vec<u8>> {
    // Anything shorter than nonce + tag cannot be a valid blob.
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(PassVaultError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| PassVaultError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| PassVaultError::DecryptionFailed)?;

    Ok(plaintext)
}
