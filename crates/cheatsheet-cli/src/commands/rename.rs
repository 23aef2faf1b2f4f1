//! Rename command implementation

use anyhow::Result;
use cheatsheet_core::{CheatsheetUpdate, Library, Storage};
use colored::Colorize;

/// Give cheatsheet `id` a new display name
pub fn execute(library: &Library<Storage>, id: &str, name: &str, quiet: bool) -> Result<()> {
    let sheet = library.update(
        id,
        CheatsheetUpdate {
            name: Some(name.to_string()),
            sections: None,
        },
    )?;
    if !quiet {
        println!("✓ Renamed {} to '{}'", sheet.id(), sheet.name().green());
    }
    Ok(())
}
