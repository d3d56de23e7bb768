//! `passvault copy` — copy a secret's value to the clipboard.
//!
//! The clipboard is cleared again after `clipboardSeconds` from the
//! settings file (default 15), so a copied password does not linger.

use std::time::Duration;

use arboard::Clipboard;

use crate::cli::commands::find_by_name;
use crate::cli::output;
use crate::cli::{open_service, prompt_password, unlock_or_fail, vault_dir, Cli};
use crate::config::Settings;
use crate::errors::{PassVaultError, Result};

/// Execute the `copy` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let dir = vault_dir(cli)?;
    let settings = Settings::load(&dir)?;

    let service = open_service(cli)?;
    let password = prompt_password("Enter vault password")?;
    unlock_or_fail(&service, password.as_bytes())?;

    let secrets = service.get_secrets()?;
    let secret = find_by_name(&secrets, name)?;

    let mut clipboard = Clipboard::new()
        .map_err(|e| PassVaultError::CommandFailed(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(secret.value.clone())
        .map_err(|e| PassVaultError::CommandFailed(format!("clipboard write: {e}")))?;

    let seconds = settings.clipboard_seconds;
    output::success(&format!("Copied '{name}' to clipboard"));
    output::info(&format!("Clearing clipboard in {seconds} seconds…"));

    std::thread::sleep(Duration::from_secs(u64::from(seconds)));
    let _ = clipboard.clear();

    output::success("Clipboard cleared");
    Ok(())
}
