//! cheatsheet CLI - structured cheatsheets with Markdown import and export
//!
//! This is the main entry point for the cheatsheet command-line interface.
//! Command implementations live in [`commands`], one module per command.

use anyhow::{Context, Result};
use cheatsheet_core::{Config, Library, Storage};
use clap::Parser;
use tracing::debug;

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::initialize_logging(&cli)?;

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(dir) = &cli.data_dir {
        config.paths.root.clone_from(dir);
    }
    debug!("Using data directory {}", config.paths.root.display());

    let library = Library::open(&config).context("Failed to open cheatsheet storage")?;
    execute_command(cli, &config, &library)
}

fn execute_command(cli: Cli, config: &Config, library: &Library<Storage>) -> Result<()> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::New { name } => commands::new_cheatsheet(library, &name, quiet),
        Commands::List { format } => commands::list_cheatsheets(library, format),
        Commands::Show { id } => commands::show_cheatsheet(library, &id),
        Commands::Rename { id, name } => commands::rename_cheatsheet(library, &id, &name, quiet),
        Commands::Delete { id } => commands::delete_cheatsheet(library, &id, quiet),
        Commands::Import(command) => commands::import(library, &command, quiet),
        Commands::Export { id, format, output } => {
            commands::export_cheatsheet(library, &id, format, output.as_deref(), quiet)
        },
        Commands::ExportAll { output } => commands::export_all(library, output.as_deref(), quiet),
        Commands::Search {
            query,
            limit,
            format,
        } => {
            let limit = limit.unwrap_or(config.search.limit);
            commands::search(library, &query, limit, format)
        },
    }
}
