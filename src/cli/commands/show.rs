//! `passvault show` — print one secret in full, value included.

use crate::cli::commands::find_by_name;
use crate::cli::output;
use crate::cli::{open_service, prompt_password, unlock_or_fail, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let service = open_service(cli)?;
    let password = prompt_password("Enter vault password")?;
    unlock_or_fail(&service, password.as_bytes())?;

    let secrets = service.get_secrets()?;
    let secret = find_by_name(&secrets, name)?;

    output::print_secret_details(secret);

    Ok(())
}
