//! Export command implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cheatsheet_core::{Library, Storage, json::ALL_CHEATSHEETS_FILE_NAME, suggested_file_name};
use tracing::debug;

use crate::cli::ExportFormat;

/// Export one cheatsheet to stdout or a file
pub fn execute(
    library: &Library<Storage>,
    id: &str,
    format: ExportFormat,
    output: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let content = match format {
        ExportFormat::Markdown => library.export_markdown(id)?,
        ExportFormat::Json => library.export_json(id)?,
    };

    match output {
        None => emit_stdout(&content),
        Some(path) => {
            let target = if path.is_dir() {
                let sheet = library.get(id)?;
                path.join(suggested_file_name(&sheet, format.extension()))
            } else {
                path.to_path_buf()
            };
            write_file(&target, &content, quiet)?;
        },
    }
    Ok(())
}

/// Export every cheatsheet as one JSON array
pub fn execute_all(library: &Library<Storage>, output: Option<&Path>, quiet: bool) -> Result<()> {
    let content = library.export_all_json()?;

    match output {
        None => emit_stdout(&content),
        Some(path) => {
            let target = if path.is_dir() {
                path.join(ALL_CHEATSHEETS_FILE_NAME)
            } else {
                path.to_path_buf()
            };
            write_file(&target, &content, quiet)?;
        },
    }
    Ok(())
}

fn emit_stdout(content: &str) {
    if content.ends_with('\n') {
        print!("{content}");
    } else {
        println!("{content}");
    }
}

fn write_file(target: &Path, content: &str, quiet: bool) -> Result<()> {
    fs::write(target, content)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    debug!("Wrote {} bytes to {}", content.len(), target.display());
    if !quiet {
        println!("✓ Exported to {}", target.display());
    }
    Ok(())
}
