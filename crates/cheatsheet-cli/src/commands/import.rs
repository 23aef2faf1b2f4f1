//! Import command implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cheatsheet_core::{Cheatsheet, Library, Storage};
use colored::Colorize;

use crate::cli::ImportCommand;
use crate::output::text;

/// Import one or more cheatsheets from a file
pub fn execute(library: &Library<Storage>, command: &ImportCommand, quiet: bool) -> Result<()> {
    match command {
        ImportCommand::Markdown { file, name } => {
            let markdown = read_source(file)?;
            let sheet = library.import_markdown(&markdown, name.as_deref())?;
            report_created(&sheet, quiet);
        },
        ImportCommand::Json { file } => {
            let json = read_source(file)?;
            let sheet = library.import_json(&json)?;
            report_created(&sheet, quiet);
        },
        ImportCommand::Bulk { file } => {
            let json = read_source(file)?;
            let report = library.import_bulk(&json)?;
            if !quiet {
                print!("{}", text::render_bulk_report(&report));
            }
        },
    }
    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn report_created(sheet: &Cheatsheet, quiet: bool) {
    if !quiet {
        println!(
            "✓ Created cheatsheet '{}' ({})",
            sheet.name().green(),
            sheet.id()
        );
    }
}
