//! `passvault delete` — remove a secret from the vault.

use dialoguer::Confirm;

use crate::cli::commands::resolve_id;
use crate::cli::output;
use crate::cli::{audit_event, open_service, prompt_password, unlock_or_fail, vault_dir, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete secret '{id}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let service = open_service(cli)?;
    let password = prompt_password("Enter vault password")?;
    unlock_or_fail(&service, password.as_bytes())?;

    let secrets = service.get_secrets()?;
    let full_id = resolve_id(&secrets, id)?;
    service.delete_secret(&full_id)?;

    audit_event(&vault_dir(cli)?, "delete", None, Some(&full_id));
    output::success(&format!("Deleted secret {full_id}"));

    Ok(())
}
