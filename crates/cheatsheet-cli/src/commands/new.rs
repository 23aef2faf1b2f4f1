//! New command implementation

use anyhow::Result;
use cheatsheet_core::{Library, Storage};
use colored::Colorize;

/// Create an empty cheatsheet named `name`
pub fn execute(library: &Library<Storage>, name: &str, quiet: bool) -> Result<()> {
    let sheet = library.create(name)?;
    if !quiet {
        println!(
            "✓ Created cheatsheet '{}' ({})",
            sheet.name().green(),
            sheet.id()
        );
    }
    Ok(())
}
