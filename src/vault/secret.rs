//! Secret types stored inside the vault.
//!
//! A `Secret` is one record in the encrypted collection.  The whole
//! collection is serialized and sealed as a single blob, so these types
//! only describe the plaintext shape.  Field names serialize in
//! camelCase to match the vault's JSON wire format.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::PassVaultError;

/// The closed set of secret categories a vault can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecretKind {
    Password,
    ApiKey,
    SshKey,
    Note,
    Totp,
    CreditCard,
    BankAccount,
    CryptoKey,
    SoftwareKey,
    WifiCredentials,
    SecureUrl,
    Other,
}

impl SecretKind {
    /// The kebab-case name used on disk and on the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::ApiKey => "api-key",
            Self::SshKey => "ssh-key",
            Self::Note => "note",
            Self::Totp => "totp",
            Self::CreditCard => "credit-card",
            Self::BankAccount => "bank-account",
            Self::CryptoKey => "crypto-key",
            Self::SoftwareKey => "software-key",
            Self::WifiCredentials => "wifi-credentials",
            Self::SecureUrl => "secure-url",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecretKind {
    type Err = PassVaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password" => Ok(Self::Password),
            "api-key" => Ok(Self::ApiKey),
            "ssh-key" => Ok(Self::SshKey),
            "note" => Ok(Self::Note),
            "totp" => Ok(Self::Totp),
            "credit-card" => Ok(Self::CreditCard),
            "bank-account" => Ok(Self::BankAccount),
            "crypto-key" => Ok(Self::CryptoKey),
            "software-key" => Ok(Self::SoftwareKey),
            "wifi-credentials" => Ok(Self::WifiCredentials),
            "secure-url" => Ok(Self::SecureUrl),
            "other" => Ok(Self::Other),
            other => Err(PassVaultError::CommandFailed(format!(
                "unknown secret type '{other}' — run `passvault add --help` for the list"
            ))),
        }
    }
}

/// A single secret record.
///
/// `id` is assigned once at creation and never changes.  `last_accessed`
/// is refreshed whenever the record is edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SecretKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// The caller-supplied part of a new secret — everything except the
/// id and timestamps, which the store assigns on insertion.
#[derive(Debug, Clone)]
pub struct SecretDraft {
    pub name: String,
    pub kind: SecretKind,
    pub value: String,
    pub username: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub category: Option<String>,
}

impl SecretDraft {
    /// Materialize the draft into a full `Secret` with a fresh UUID
    /// and both timestamps set to now.
    pub fn into_secret(self) -> Secret {
        let now = Utc::now();
        Secret {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            kind: self.kind,
            value: self.value,
            username: self.username,
            url: self.url,
            notes: self.notes,
            created_at: now,
            last_accessed: now,
            category: self.category,
        }
    }
}
