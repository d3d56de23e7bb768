//! `passvault init` — create a new vault.

use crate::cli::output;
use crate::cli::{audit_event, prompt_new_password, vault_dir, vault_file, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultStore;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let dir = vault_dir(cli)?;
    let path = vault_file(cli)?;

    if path.exists() {
        output::tip("Use `passvault add` to store secrets in the existing vault.");
        return Err(PassVaultError::VaultAlreadyExists(path));
    }

    // Prompt for a new password (with confirmation).
    let password = prompt_new_password()?;

    let store = VaultStore::new(&path);
    store.create(password.as_bytes())?;

    audit_event(&dir, "init", None, Some("vault created"));
    output::success(&format!("Vault created at {}", path.display()));

    output::tip("Run `passvault add <NAME>` to store a secret.");
    output::tip("Run `passvault list` to see all secrets.");

    Ok(())
}
