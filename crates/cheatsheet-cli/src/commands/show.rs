//! Show command implementation

use anyhow::Result;
use cheatsheet_core::{Library, Storage};

use crate::output::text;

/// Print the section and block outline of a cheatsheet
pub fn execute(library: &Library<Storage>, id: &str) -> Result<()> {
    let sheet = library.get(id)?;
    print!("{}", text::render_outline(&sheet));
    Ok(())
}
