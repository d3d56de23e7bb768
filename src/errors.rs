use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong password or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    /// Uniform unlock failure. Wrong password, a tampered file, and an
    /// unreadable file all collapse into this one variant so callers
    /// cannot probe file integrity through the unlock path.
    #[error("Unlock failed — wrong password")]
    UnlockFailed,

    #[error("Vault is locked")]
    VaultLocked,

    #[error("Too many failed attempts — try again in {wait_ms} ms")]
    RateLimited { wait_ms: u64 },

    #[error("Secret '{0}' not found")]
    SecretNotFound(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
