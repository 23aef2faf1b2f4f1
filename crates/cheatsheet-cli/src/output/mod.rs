//! # Output Formatting
//!
//! Commands that list things accept `--format`:
//!
//! - **text**: human-readable output with colors
//! - **json**: pretty JSON for scripts
//!
//! ```bash
//! cheatsheet list --format json | jq '.[].name'
//! ```
//!
//! Text rendering lives in [`text`] and returns strings so it can be tested
//! without capturing stdout.

pub mod text;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// Output format options supported by the CLI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Whether the format is meant for programs rather than people
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
