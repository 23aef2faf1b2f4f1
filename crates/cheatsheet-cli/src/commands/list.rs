//! List command implementation

use anyhow::Result;
use cheatsheet_core::{Library, Storage};

use crate::output::{OutputFormat, print_json, text};

/// List stored cheatsheets, most recently updated first
pub fn execute(library: &Library<Storage>, format: OutputFormat) -> Result<()> {
    let mut summaries = library.list()?;
    summaries.sort_by(|a, b| b.updated.cmp(&a.updated).then_with(|| a.id.cmp(&b.id)));

    match format {
        OutputFormat::Json => print_json(&summaries)?,
        OutputFormat::Text => {
            if summaries.is_empty() {
                println!("No cheatsheets yet. Try 'cheatsheet new <name>' or 'cheatsheet import markdown <file>'");
            } else {
                print!("{}", text::render_summaries(&summaries));
            }
        },
    }
    Ok(())
}
