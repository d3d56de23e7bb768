use clap::Parser;
use passvault::cli::commands::add::AddArgs;
use passvault::cli::commands::edit::EditArgs;
use passvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref name,
            ref value,
            ref kind,
            ref username,
            ref url,
            ref notes,
            ref category,
        } => passvault::cli::commands::add::execute(
            &cli,
            &AddArgs {
                name,
                value: value.as_deref(),
                kind,
                username: username.as_deref(),
                url: url.as_deref(),
                notes: notes.as_deref(),
                category: category.as_deref(),
            },
        ),
        Commands::List => passvault::cli::commands::list::execute(&cli),
        Commands::Show { ref name } => passvault::cli::commands::show::execute(&cli, name),
        Commands::Copy { ref name } => passvault::cli::commands::copy::execute(&cli, name),
        Commands::Edit {
            ref id,
            ref name,
            ref value,
            ref kind,
            ref username,
            ref url,
            ref notes,
            ref category,
        } => passvault::cli::commands::edit::execute(
            &cli,
            id,
            &EditArgs {
                name: name.as_deref(),
                value: value.as_deref(),
                kind: kind.as_deref(),
                username: username.as_deref(),
                url: url.as_deref(),
                notes: notes.as_deref(),
                category: category.as_deref(),
            },
        ),
        Commands::Delete { ref id, force } => {
            passvault::cli::commands::delete::execute(&cli, id, force)
        }
        Commands::ChangePassword => passvault::cli::commands::change_password::execute(&cli),
        Commands::Export { ref output } => passvault::cli::commands::export::execute(&cli, output),
        Commands::Import { ref file, force } => {
            passvault::cli::commands::import_cmd::execute(&cli, file, force)
        }
        Commands::Settings { ref action } => {
            passvault::cli::commands::settings_cmd::execute(&cli, action)
        }
        #[cfg(feature = "audit-log")]
        Commands::Audit { last } => passvault::cli::commands::audit_cmd::execute(&cli, last),
        Commands::Completions { ref shell } => passvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
