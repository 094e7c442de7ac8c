use clap::Parser;
use credvault::cli::commands;
use credvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Keygen {
            ref output,
            force,
        } => commands::keygen::execute(&cli, output.as_deref(), force),
        Commands::Generate { length } => commands::generate::execute(length),
        Commands::Init => commands::init::execute(&cli),
        Commands::Add {
            ref service,
            ref username,
            ref notes,
            source,
        } => commands::add::execute(&cli, service, username, notes.as_deref(), source),
        Commands::Get {
            ref service,
            ref username,
        } => commands::get::execute(&cli, service, username),
        Commands::List => commands::list::execute(&cli),
        Commands::Update {
            ref service,
            ref username,
            ref notes,
            source,
        } => commands::update::execute(&cli, service, username, notes.as_deref(), source),
        Commands::Delete {
            ref service,
            ref username,
            force,
        } => commands::delete::execute(&cli, service, username, force),
        Commands::SealField => commands::field::execute_seal(&cli),
        Commands::OpenField { ref sealed } => commands::field::execute_open(&cli, sealed),
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        credvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `CREDVAULT_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("CREDVAULT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
