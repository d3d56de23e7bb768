//! `passvault edit` — update fields of an existing secret.

use crate::cli::commands::resolve_id;
use crate::cli::output;
use crate::cli::{audit_event, open_service, prompt_password, unlock_or_fail, vault_dir, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::SecretKind;

/// Optional field updates for `edit`, mirrored from the clap definition.
#[derive(Default)]
pub struct EditArgs<'a> {
    pub name: Option<&'a str>,
    pub value: Option<&'a str>,
    pub kind: Option<&'a str>,
    pub username: Option<&'a str>,
    pub url: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub category: Option<&'a str>,
}

impl EditArgs<'_> {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.value.is_none()
            && self.kind.is_none()
            && self.username.is_none()
            && self.url.is_none()
            && self.notes.is_none()
            && self.category.is_none()
    }
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, id: &str, args: &EditArgs<'_>) -> Result<()> {
    if args.is_empty() {
        return Err(PassVaultError::CommandFailed(
            "nothing to change — pass at least one of --name, --value, --type, \
             --username, --url, --notes, --category"
                .into(),
        ));
    }

    let kind: Option<SecretKind> = args.kind.map(str::parse).transpose()?;

    let service = open_service(cli)?;
    let password = prompt_password("Enter vault password")?;
    unlock_or_fail(&service, password.as_bytes())?;

    let secrets = service.get_secrets()?;
    let full_id = resolve_id(&secrets, id)?;

    // resolve_id guarantees the record exists.
    let mut secret = secrets
        .into_iter()
        .find(|s| s.id == full_id)
        .ok_or_else(|| PassVaultError::SecretNotFound(full_id.clone()))?;

    if let Some(name) = args.name {
        secret.name = name.to_string();
    }
    if let Some(value) = args.value {
        secret.value = value.to_string();
    }
    if let Some(kind) = kind {
        secret.kind = kind;
    }
    if let Some(username) = args.username {
        secret.username = Some(username.to_string());
    }
    if let Some(url) = args.url {
        secret.url = Some(url.to_string());
    }
    if let Some(notes) = args.notes {
        secret.notes = Some(notes.to_string());
    }
    if let Some(category) = args.category {
        secret.category = Some(category.to_string());
    }

    let name_for_log = secret.name.clone();
    service.edit_secret(secret)?;

    audit_event(&vault_dir(cli)?, "edit", Some(&name_for_log), None);
    output::success(&format!("Updated '{name_for_log}'"));

    Ok(())
}
