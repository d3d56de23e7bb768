//! `passvault audit` — view the audit log of vault operations.

use comfy_table::{ContentArrangement, Table};

use crate::audit::AuditLog;
use crate::cli::output;
use crate::cli::{vault_dir, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize) -> Result<()> {
    let dir = vault_dir(cli)?;

    let audit = AuditLog::open(&dir).ok_or_else(|| {
        PassVaultError::AuditError(format!("cannot open audit log in {}", dir.display()))
    })?;

    let entries = audit.query(last)?;
    if entries.is_empty() {
        output::info("No audit entries yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Secret", "Details"]);

    for entry in &entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            entry.operation.clone(),
            entry.secret_name.clone().unwrap_or_default(),
            entry.details.clone().unwrap_or_default(),
        ]);
    }

    println!("{table}");
    Ok(())
}
