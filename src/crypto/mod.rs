//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption (`cipher`)
//! - Argon2id password-based key derivation (`kdf`)
//! - A zeroizing wrapper for the derived master key (`key`)

pub mod cipher;
pub mod kdf;
pub mod key;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_key, ...};
pub use cipher::{open, seal};
pub use kdf::{derive_key, derive_key_with_params, generate_salt, Argon2Params};
pub use key::MasterKey;
