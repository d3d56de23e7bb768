//! `passvault settings` — show or change user settings.

use crate::cli::output;
use crate::cli::{vault_dir, Cli, SettingsAction};
use crate::config::Settings;
use crate::errors::{PassVaultError, Result};

/// Execute the `settings` command.
pub fn execute(cli: &Cli, action: &SettingsAction) -> Result<()> {
    let dir = vault_dir(cli)?;

    match action {
        SettingsAction::Show => {
            let settings = Settings::load(&dir)?;
            output::info(&format!(
                "autoLockMinutes = {} (UI auto-lock delay)",
                settings.auto_lock_minutes
            ));
            output::info(&format!(
                "clipboardSeconds = {} (clipboard clear delay)",
                settings.clipboard_seconds
            ));
        }
        SettingsAction::Set {
            auto_lock_minutes,
            clipboard_seconds,
        } => {
            if auto_lock_minutes.is_none() && clipboard_seconds.is_none() {
                return Err(PassVaultError::CommandFailed(
                    "nothing to change — pass --auto-lock-minutes or --clipboard-seconds".into(),
                ));
            }

            let mut settings = Settings::load(&dir)?;
            if let Some(minutes) = auto_lock_minutes {
                settings.auto_lock_minutes = *minutes;
            }
            if let Some(seconds) = clipboard_seconds {
                settings.clipboard_seconds = *seconds;
            }
            settings.save(&dir)?;

            output::success("Settings saved");
        }
    }

    Ok(())
}
