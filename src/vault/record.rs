//! On-disk vault record and atomic persistence.
//!
//! The vault is a single JSON file with this shape:
//!
//! ```json
//! {
//!   "salt": "<base64, 16 bytes>",
//!   "verifier": "<base64 of nonce || ciphertext || tag>",
//!   "secrets": [],
//!   "secretsEncrypted": "<base64 of nonce || ciphertext || tag>"
//! }
//! ```
//!
//! - **salt**: input to Argon2id key derivation.
//! - **verifier**: the constant `"vault-check"` sealed under the current
//!   key.  Opening it proves a candidate key is correct without storing
//!   the password or the key.
//! - **secrets**: legacy plaintext array.  Emptied on the first
//!   encrypted write and kept only so old files still load.
//! - **secretsEncrypted**: the serialized secret collection sealed under
//!   the current key.  Absent until the vault first stores secrets.
//!
//! Invariant: salt, verifier, and secretsEncrypted always correspond to
//! the *same* current key.  Every write that touches any of them goes
//! through `write_record`, which persists the whole record via
//! temp-file + rename so a crash mid-write never leaves a torn file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::secret::Secret;
use crate::errors::{PassVaultError, Result};

/// The constant plaintext sealed into the verifier field.
pub const VERIFIER_PLAINTEXT: &[u8] = b"vault-check";

/// The complete on-disk state of one vault installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultRecord {
    /// Salt for Argon2id key derivation (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// AEAD seal of `VERIFIER_PLAINTEXT` under the current key.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub verifier: Vec<u8>,

    /// Legacy plaintext secrets. Always written back empty once the
    /// encrypted blob exists.
    #[serde(default)]
    pub secrets: Vec<Secret>,

    /// AEAD seal of the serialized secret collection, if any has ever
    /// been stored.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "base64_encode_opt",
        deserialize_with = "base64_decode_opt"
    )]
    pub secrets_encrypted: Option<Vec<u8>>,
}

/// Read and parse the vault record at `path`.
pub fn read_record(path: &Path) -> Result<VaultRecord> {
    if !path.exists() {
        return Err(PassVaultError::VaultNotFound(path.to_path_buf()));
    }

    let data = fs::read(path)?;
    serde_json::from_slice(&data)
        .map_err(|e| PassVaultError::InvalidVaultFormat(format!("vault JSON: {e}")))
}

/// Write a vault record to disk **atomically**.
///
/// Serializes to pretty JSON, writes to a temp file in the same
/// directory, then renames over the target path.  The rename ensures
/// readers never see a half-written file, and a record is never
/// observable with a mix of old and new key material.
pub fn write_record(path: &Path, record: &VaultRecord) -> Result<()> {
    let data = serde_json::to_vec_pretty(record)
        .map_err(|e| PassVaultError::SerializationError(format!("vault record: {e}")))?;

    // The temp file lives in the same directory so rename is guaranteed
    // to be atomic on the same filesystem.
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, &data)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded byte fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

pub(crate) fn base64_encode_opt<S>(
    data: &Option<Vec<u8>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match data {
        Some(bytes) => base64_encode(bytes, serializer),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn base64_decode_opt<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<u8>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) => BASE64.decode(&s).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_record() -> VaultRecord {
        VaultRecord {
            salt: vec![7u8; 16],
            verifier: vec![1, 2, 3, 4],
            secrets: Vec::new(),
            secrets_encrypted: Some(vec![9, 8, 7]),
        }
    }

    #[test]
    fn record_roundtrips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");

        let record = sample_record();
        write_record(&path, &record).unwrap();
        let loaded = read_record(&path).unwrap();

        assert_eq!(loaded.salt, record.salt);
        assert_eq!(loaded.verifier, record.verifier);
        assert_eq!(loaded.secrets_encrypted, record.secrets_encrypted);
    }

    #[test]
    fn byte_fields_are_base64_strings_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");

        write_record(&path, &sample_record()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert!(raw["salt"].is_string());
        assert!(raw["verifier"].is_string());
        assert!(raw["secretsEncrypted"].is_string());
        assert!(raw["secrets"].is_array());
    }

    #[test]
    fn missing_encrypted_blob_parses_as_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");

        let json = r#"{ "salt": "AAAAAAAAAAAAAAAAAAAAAA==", "verifier": "AQID", "secrets": [] }"#;
        std::fs::write(&path, json).unwrap();

        let record = read_record(&path).unwrap();
        assert!(record.secrets_encrypted.is_none());
        assert!(record.secrets.is_empty());
    }

    #[test]
    fn reading_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = read_record(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(PassVaultError::VaultNotFound(_))));
    }

    #[test]
    fn reading_garbage_fails_with_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");
        std::fs::write(&path, b"not json at all").unwrap();

        let result = read_record(&path);
        assert!(matches!(result, Err(PassVaultError::InvalidVaultFormat(_))));
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");
        write_record(&path, &sample_record()).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
