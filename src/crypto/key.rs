//! Zeroizing wrapper for the derived master key.

use zeroize::Zeroize;

use super::kdf::KEY_LEN;

/// A wrapper around a 32-byte master key that automatically zeroes
/// its memory when dropped.
///
/// Every key handed out by the vault core lives inside one of these,
/// so locking a session or dropping a store wipes the key bytes.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
