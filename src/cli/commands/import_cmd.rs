//! `passvault import` — replace the current vault with an exported file.

use std::path::Path;

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{audit_event, open_service, vault_dir, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `import` command.
pub fn execute(cli: &Cli, file: &str, force: bool) -> Result<()> {
    let service = open_service(cli)?;

    // Importing overwrites the current vault; confirm unless --force.
    if service.store().exists() && !force {
        let confirmed = Confirm::new()
            .with_prompt("This replaces the current vault. Continue?")
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    service.import_vault(Path::new(file))?;

    audit_event(&vault_dir(cli)?, "import", None, Some(file));
    output::success("Vault imported");
    output::tip("Unlock it with the imported vault's master password.");

    Ok(())
}
