//! `passvault export` — copy the encrypted vault file elsewhere.
//!
//! The exported file is the vault record as stored: still sealed under
//! the master password.  `passvault import` accepts it back.

use std::path::Path;

use crate::cli::output;
use crate::cli::{audit_event, open_service, prompt_password, unlock_or_fail, vault_dir, Cli};
use crate::errors::Result;

/// Execute the `export` command.
pub fn execute(cli: &Cli, output_path: &str) -> Result<()> {
    let service = open_service(cli)?;

    // Require a successful unlock so a passer-by cannot exfiltrate the
    // record through the CLI without the master password.
    let password = prompt_password("Enter vault password")?;
    unlock_or_fail(&service, password.as_bytes())?;

    let dest = Path::new(output_path);
    service.export_vault(dest)?;

    audit_event(&vault_dir(cli)?, "export", None, Some(output_path));
    output::success(&format!("Vault exported to {}", dest.display()));
    output::tip("The export is still encrypted — the master password unlocks it.");

    Ok(())
}
