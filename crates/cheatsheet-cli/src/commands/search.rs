//! Search command implementation

use anyhow::Result;
use cheatsheet_core::{Library, Storage};
use tracing::debug;

use crate::output::{OutputFormat, print_json, text};

/// Search every cheatsheet for `query`, keeping at most `limit` matches
pub fn execute(
    library: &Library<Storage>,
    query: &str,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let mut matches = library.search(query)?;
    let total = matches.len();
    matches.truncate(limit);
    debug!("Search '{}' found {} matches, showing {}", query, total, matches.len());

    match format {
        OutputFormat::Json => print_json(&matches)?,
        OutputFormat::Text => {
            if matches.is_empty() {
                println!("No matches for '{query}'");
            } else {
                print!("{}", text::render_matches(&matches));
                if total > matches.len() {
                    println!("... {} more (raise --limit to see them)", total - matches.len());
                }
            }
        },
    }
    Ok(())
}
