use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PassVaultError, Result};

/// User settings, loaded from `settings.json` next to the vault file.
///
/// Every field has a sensible default so PassVault works without any
/// settings file at all; partial files are merged over the defaults.
/// Field names are camelCase on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Minutes of inactivity before an embedding UI locks the session
    /// (default: 5). The CLI itself locks on exit by construction.
    #[serde(default = "default_auto_lock_minutes")]
    pub auto_lock_minutes: u32,

    /// Seconds before a copied secret is cleared from the clipboard
    /// (default: 15).
    #[serde(default = "default_clipboard_seconds")]
    pub clipboard_seconds: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_auto_lock_minutes() -> u32 {
    5
}

fn default_clipboard_seconds() -> u32 {
    15
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_lock_minutes: default_auto_lock_minutes(),
            clipboard_seconds: default_clipboard_seconds(),
        }
    }
}

impl Settings {
    /// Name of the settings file stored beside the vault.
    const FILE_NAME: &'static str = "settings.json";

    /// Load settings from `<vault_dir>/settings.json`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(vault_dir: &Path) -> Result<Self> {
        let config_path = Self::path(vault_dir);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Persist the settings to `<vault_dir>/settings.json`.
    pub fn save(&self, vault_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(vault_dir)?;
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PassVaultError::SerializationError(format!("settings: {e}")))?;
        std::fs::write(Self::path(vault_dir), contents)?;
        Ok(())
    }

    /// Full path of the settings file for a vault directory.
    pub fn path(vault_dir: &Path) -> PathBuf {
        vault_dir.join(Self::FILE_NAME)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
