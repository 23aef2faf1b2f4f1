//! # CLI Structure and Argument Parsing
//!
//! The command-line interface for `cheatsheet`, built with `clap` derive
//! macros.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # Create and inspect
//! cheatsheet new "Git Basics"
//! cheatsheet list
//! cheatsheet show cs_0190f3c2...
//!
//! # Markdown and JSON round trips
//! cheatsheet import markdown notes.md --name "Notes"
//! cheatsheet export cs_0190f3c2... --format markdown --output notes.md
//! cheatsheet export-all --output backups/
//!
//! # Search every cheatsheet
//! cheatsheet search "reset --hard" --limit 10 --format json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Main CLI structure for the `cheatsheet` command
#[derive(Parser, Clone, Debug)]
#[command(name = "cheatsheet")]
#[command(version)]
#[command(about = "cheatsheet - Structured cheatsheets with Markdown import and export", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Data directory (overrides config and `CHEATSHEET_DATA_DIR`)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Create an empty cheatsheet
    New {
        /// Display name
        name: String,
    },

    /// List stored cheatsheets
    #[command(alias = "ls")]
    List {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the outline of a cheatsheet
    Show {
        /// Cheatsheet id
        id: String,
    },

    /// Rename a cheatsheet
    Rename {
        /// Cheatsheet id
        id: String,
        /// New display name
        name: String,
    },

    /// Delete a cheatsheet
    #[command(alias = "rm")]
    Delete {
        /// Cheatsheet id
        id: String,
    },

    /// Import cheatsheets from Markdown or JSON files
    #[command(subcommand)]
    Import(ImportCommand),

    /// Export one cheatsheet
    Export {
        /// Cheatsheet id
        id: String,

        /// Export format
        #[arg(short = 'f', long, value_enum, default_value = "markdown")]
        format: ExportFormat,

        /// Write to this file, or into this directory under a derived name (default: stdout)
        #[arg(short = 'o', long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Export every cheatsheet as one JSON array
    ExportAll {
        /// Write to this file, or into this directory as `all_cheatsheets.json` (default: stdout)
        #[arg(short = 'o', long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Search names, section titles and block content
    Search {
        /// Text to look for (case-insensitive, at least 2 characters)
        query: String,

        /// Maximum number of results (default from config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Import sources
#[derive(Subcommand, Clone, Debug)]
pub enum ImportCommand {
    /// Import a Markdown file as a new cheatsheet
    Markdown {
        /// Markdown file
        file: PathBuf,

        /// Name for the new cheatsheet (default from config)
        #[arg(long)]
        name: Option<String>,
    },

    /// Import one cheatsheet from a JSON export
    Json {
        /// JSON file holding a single cheatsheet
        file: PathBuf,
    },

    /// Import a JSON array of cheatsheets
    Bulk {
        /// JSON file holding an array of cheatsheets
        file: PathBuf,
    },
}

/// Formats a single cheatsheet can be exported in
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Markdown text
    #[value(alias = "md")]
    Markdown,
    /// Pretty-printed JSON
    Json,
}

impl ExportFormat {
    /// File extension for this format
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export_defaults() {
        let cli = Cli::try_parse_from(["cheatsheet", "export", "cs_1"]).unwrap();
        match cli.command {
            Commands::Export { id, format, output } => {
                assert_eq!(id, "cs_1");
                assert_eq!(format, ExportFormat::Markdown);
                assert!(output.is_none());
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["cheatsheet", "list", "--quiet", "--data-dir", "/tmp/x"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_import_markdown_with_name() {
        let cli =
            Cli::try_parse_from(["cheatsheet", "import", "markdown", "a.md", "--name", "A"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Import(ImportCommand::Markdown { name: Some(ref n), .. }) if n == "A"
        ));
    }
}
