//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::Zeroizing;

use crate::errors::{PassVaultError, Result};
use crate::vault::VaultService;

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Name of the vault file inside the vault directory.
const VAULT_FILE_NAME: &str = "vault.json";

/// PassVault CLI: encrypted personal secrets vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Encrypted personal secrets vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: .passvault)
    #[arg(long, default_value = ".passvault", global = true)]
    pub vault_dir: String,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a new vault
    Init,

    /// Add a secret
    Add {
        /// Display name (e.g. GitHub)
        name: String,
        /// Secret value (omit for interactive prompt)
        value: Option<String>,
        /// Secret type: password, api-key, ssh-key, note, totp,
        /// credit-card, bank-account, crypto-key, software-key,
        /// wifi-credentials, secure-url, other
        #[arg(short = 't', long = "type", default_value = "password")]
        kind: String,
        /// Username / account identifier
        #[arg(long)]
        username: Option<String>,
        /// Associated URL
        #[arg(long)]
        url: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Category label for grouping
        #[arg(long)]
        category: Option<String>,
    },

    /// List all secrets
    List,

    /// Show one secret, including its value
    Show {
        /// Secret name
        name: String,
    },

    /// Copy a secret's value to the clipboard (auto-clears)
    Copy {
        /// Secret name
        name: String,
    },

    /// Edit an existing secret
    Edit {
        /// Secret id (see `passvault list`)
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New value
        #[arg(long)]
        value: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New username
        #[arg(long)]
        username: Option<String>,
        /// New URL
        #[arg(long)]
        url: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a secret
    Delete {
        /// Secret id (see `passvault list`)
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Change the vault's master password
    ChangePassword,

    /// Export the encrypted vault file
    Export {
        /// Destination path
        output: String,
    },

    /// Import a vault file, replacing the current vault
    Import {
        /// Path to the vault file to import
        file: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// View the audit log of vault operations
    #[cfg(feature = "audit-log")]
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Settings subcommands.
#[derive(clap::Subcommand)]
pub enum SettingsAction {
    /// Print the current settings
    Show,

    /// Change one or more settings
    Set {
        /// Minutes of inactivity before auto-lock
        #[arg(long)]
        auto_lock_minutes: Option<u32>,
        /// Seconds before the clipboard is cleared after `copy`
        #[arg(long)]
        clipboard_seconds: Option<u32>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault directory from the CLI arguments.
///
/// Relative paths are taken from the current working directory.
pub fn vault_dir(cli: &Cli) -> Result<PathBuf> {
    let dir = PathBuf::from(&cli.vault_dir);
    if dir.is_absolute() {
        Ok(dir)
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}

/// Full path of the vault file.
pub fn vault_file(cli: &Cli) -> Result<PathBuf> {
    Ok(vault_dir(cli)?.join(VAULT_FILE_NAME))
}

/// Build the vault service for this invocation.
pub fn open_service(cli: &Cli) -> Result<VaultService> {
    Ok(VaultService::new(vault_file(cli)?))
}

/// Get the vault password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var (scripting/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("PASSVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used during `init` and
/// `change-password`).
///
/// Also respects `PASSVAULT_NEW_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("PASSVAULT_NEW_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(PassVaultError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose vault password")
            .with_confirmation(
                "Confirm vault password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Run the rate-limited unlock and translate a failure into the
/// user-facing error: a countdown while blocked, otherwise the generic
/// wrong-password message.
pub fn unlock_or_fail(service: &VaultService, password: &[u8]) -> Result<()> {
    let outcome = service.unlock(password);
    if outcome.success {
        return Ok(());
    }

    match service.rate_limit_wait_ms() {
        Some(wait_ms) => Err(PassVaultError::RateLimited { wait_ms }),
        None => Err(PassVaultError::UnlockFailed),
    }
}

/// Record an audit event, compiled out without the `audit-log` feature.
#[cfg(feature = "audit-log")]
pub fn audit_event(vault_dir: &Path, op: &str, secret_name: Option<&str>, details: Option<&str>) {
    crate::audit::log_audit(vault_dir, op, secret_name, details);
}

#[cfg(not(feature = "audit-log"))]
pub fn audit_event(_: &Path, _: &str, _: Option<&str>, _: Option<&str>) {}
