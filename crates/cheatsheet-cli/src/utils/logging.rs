//! Logging initialization and color control.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for
//! command output.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, Commands};
use crate::output::OutputFormat;

/// Log level for the given flags and command output format.
///
/// JSON output raises the threshold to ERROR unless `--verbose` was passed.
fn log_level(cli: &Cli, format: Option<OutputFormat>) -> Level {
    if cli.verbose {
        Level::DEBUG
    } else if cli.quiet || format.is_some_and(OutputFormat::is_machine_readable) {
        Level::ERROR
    } else {
        Level::WARN
    }
}

fn command_format(command: &Commands) -> Option<OutputFormat> {
    match command {
        Commands::List { format } | Commands::Search { format, .. } => Some(*format),
        _ => None,
    }
}

/// Initialize the tracing subscriber and color override from CLI flags.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let format = command_format(&cli.command);
    let level = log_level(cli, format);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    let machine_output = format.is_some_and(OutputFormat::is_machine_readable);
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_default_level_is_warn() {
        let cli = parse(&["cheatsheet", "list"]);
        assert_eq!(log_level(&cli, command_format(&cli.command)), Level::WARN);
    }

    #[test]
    fn test_json_output_quiets_logs() {
        let cli = parse(&["cheatsheet", "search", "git", "--format", "json"]);
        assert_eq!(log_level(&cli, command_format(&cli.command)), Level::ERROR);
    }

    #[test]
    fn test_verbose_wins_over_json() {
        let cli = parse(&["cheatsheet", "-v", "list", "-f", "json"]);
        assert_eq!(log_level(&cli, command_format(&cli.command)), Level::DEBUG);
    }

    #[test]
    fn test_quiet_level() {
        let cli = parse(&["cheatsheet", "--quiet", "show", "cs_1"]);
        assert_eq!(log_level(&cli, command_format(&cli.command)), Level::ERROR);
    }
}
