//! Command implementations, one module per subcommand.

pub mod add;
#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod change_password;
pub mod completions;
pub mod copy;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import_cmd;
pub mod init;
pub mod list;
pub mod settings_cmd;
pub mod show;

use crate::errors::{PassVaultError, Result};
use crate::vault::Secret;

/// Resolve a user-supplied id (full UUID or unique prefix) against the
/// secret collection.
///
/// `passvault list` shows 8-character id prefixes, so `edit` and
/// `delete` accept those as long as they are unambiguous.
pub(crate) fn resolve_id(secrets: &[Secret], input: &str) -> Result<String> {
    if let Some(exact) = secrets.iter().find(|s| s.id == input) {
        return Ok(exact.id.clone());
    }

    let matches: Vec<&Secret> = secrets.iter().filter(|s| s.id.starts_with(input)).collect();
    match matches.as_slice() {
        [one] => Ok(one.id.clone()),
        [] => Err(PassVaultError::SecretNotFound(input.to_string())),
        _ => Err(PassVaultError::CommandFailed(format!(
            "id prefix '{input}' is ambiguous — use more characters"
        ))),
    }
}

/// Find a secret by exact display name.
pub(crate) fn find_by_name<'a>(secrets: &'a [Secret], name: &str) -> Result<&'a Secret> {
    secrets
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| PassVaultError::SecretNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::{SecretDraft, SecretKind};

    fn secret(name: &str) -> Secret {
        SecretDraft {
            name: name.into(),
            kind: SecretKind::Password,
            value: "v".into(),
            username: None,
            url: None,
            notes: None,
            category: None,
        }
        .into_secret()
    }

    #[test]
    fn resolve_full_id() {
        let secrets = vec![secret("a"), secret("b")];
        let id = secrets[1].id.clone();
        assert_eq!(resolve_id(&secrets, &id).unwrap(), id);
    }

    #[test]
    fn resolve_unique_prefix() {
        let secrets = vec![secret("a")];
        let prefix: String = secrets[0].id.chars().take(8).collect();
        assert_eq!(resolve_id(&secrets, &prefix).unwrap(), secrets[0].id);
    }

    #[test]
    fn resolve_unknown_id_fails() {
        let secrets = vec![secret("a")];
        assert!(resolve_id(&secrets, "zzzzzzzz").is_err());
    }

    #[test]
    fn find_by_name_exact_match_only() {
        let secrets = vec![secret("GitHub")];
        assert!(find_by_name(&secrets, "GitHub").is_ok());
        assert!(find_by_name(&secrets, "github").is_err());
    }
}
