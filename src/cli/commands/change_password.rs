//! `passvault change-password` — rotate the vault master password.
//!
//! Verifies the old password, re-derives keys under a fresh salt,
//! re-encrypts the secret collection, and swaps the vault record in one
//! atomic write.  A failure at any step leaves the old record intact.

use crate::cli::output;
use crate::cli::{audit_event, open_service, prompt_new_password, prompt_password, vault_dir, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `change-password` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let service = open_service(cli)?;

    output::info("Enter your current vault password.");
    let old_password = prompt_password("Current vault password")?;

    output::info("Choose your new vault password.");
    let new_password = prompt_new_password()?;

    // Deliberately coarse: the boundary reports success or failure only.
    if !service.change_master_password(old_password.as_bytes(), new_password.as_bytes()) {
        return Err(PassVaultError::CommandFailed(
            "could not change password".into(),
        ));
    }

    audit_event(&vault_dir(cli)?, "change-password", None, None);
    output::success("Master password changed");

    Ok(())
}
