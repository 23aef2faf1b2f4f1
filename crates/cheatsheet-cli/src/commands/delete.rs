//! Delete command implementation

use anyhow::Result;
use cheatsheet_core::{Library, Storage};
use colored::Colorize;

/// Delete cheatsheet `id`
pub fn execute(library: &Library<Storage>, id: &str, quiet: bool) -> Result<()> {
    let name = library.get(id)?.name().to_string();
    library.delete(id)?;
    if !quiet {
        println!("✓ Deleted cheatsheet '{}' ({id})", name.red());
    }
    Ok(())
}
