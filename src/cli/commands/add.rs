//! `passvault add` — store a new secret in the vault.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{audit_event, open_service, prompt_password, unlock_or_fail, vault_dir, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::{SecretDraft, SecretKind};

/// Arguments for `add`, mirrored from the clap definition.
pub struct AddArgs<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
    pub kind: &'a str,
    pub username: Option<&'a str>,
    pub url: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub category: Option<&'a str>,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: &AddArgs<'_>) -> Result<()> {
    let kind: SecretKind = args.kind.parse()?;

    // Take the value from the argument or prompt for it (hidden input).
    let value = match args.value {
        Some(v) => Zeroizing::new(v.to_string()),
        None => Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(format!("Value for '{}'", args.name))
                .interact()
                .map_err(|e| PassVaultError::CommandFailed(format!("value prompt: {e}")))?,
        ),
    };

    let service = open_service(cli)?;
    let password = prompt_password("Enter vault password")?;
    unlock_or_fail(&service, password.as_bytes())?;

    let secret = service.add_secret(SecretDraft {
        name: args.name.to_string(),
        kind,
        value: value.to_string(),
        username: args.username.map(str::to_string),
        url: args.url.map(str::to_string),
        notes: args.notes.map(str::to_string),
        category: args.category.map(str::to_string),
    })?;

    audit_event(&vault_dir(cli)?, "add", Some(&secret.name), None);
    output::success(&format!("Added {} '{}' ({})", kind, secret.name, secret.id));

    Ok(())
}
