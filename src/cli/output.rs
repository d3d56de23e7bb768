//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.  Secret values are only
//! ever printed by `show` — the table views stay metadata-only.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Secret;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of secrets (Id, Name, Type, Username, Created, Last accessed).
pub fn print_secrets_table(secrets: &[Secret]) {
    if secrets.is_empty() {
        info("No secrets in this vault yet.");
        tip("Run `passvault add <NAME>` to add your first secret.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Id",
        "Name",
        "Type",
        "Username",
        "Created",
        "Last accessed",
    ]);

    for s in secrets {
        table.add_row(vec![
            short_id(&s.id),
            s.name.clone(),
            s.kind.to_string(),
            s.username.clone().unwrap_or_default(),
            s.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            s.last_accessed.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
    tip("Use the full id (from `show`) with `edit` and `delete`.");
}

/// Print the full detail view of one secret, value included.
pub fn print_secret_details(secret: &Secret) {
    println!("{}: {}", style("Id").bold(), secret.id);
    println!("{}: {}", style("Name").bold(), secret.name);
    println!("{}: {}", style("Type").bold(), secret.kind);
    println!("{}: {}", style("Value").bold(), secret.value);
    if let Some(username) = &secret.username {
        println!("{}: {}", style("Username").bold(), username);
    }
    if let Some(url) = &secret.url {
        println!("{}: {}", style("URL").bold(), url);
    }
    if let Some(notes) = &secret.notes {
        println!("{}: {}", style("Notes").bold(), notes);
    }
    if let Some(category) = &secret.category {
        println!("{}: {}", style("Category").bold(), category);
    }
    println!(
        "{}: {}",
        style("Created").bold(),
        secret.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "{}: {}",
        style("Last accessed").bold(),
        secret.last_accessed.format("%Y-%m-%d %H:%M:%S")
    );
}

/// First 8 characters of a UUID, enough to tell entries apart in a table.
fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
