//! `passvault list` — display all secrets in a table.

use crate::cli::output;
use crate::cli::{open_service, prompt_password, unlock_or_fail, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let service = open_service(cli)?;
    let password = prompt_password("Enter vault password")?;
    unlock_or_fail(&service, password.as_bytes())?;

    let secrets = service.get_secrets()?;

    output::info(&format!("{} secret(s)", secrets.len()));
    output::print_secrets_table(&secrets);

    Ok(())
}
