//! Human-readable renderings of summaries, outlines and search results.

use std::fmt::Write as _;

use cheatsheet_core::{
    BlockKind, BulkImportReport, Cheatsheet, CheatsheetSummary, MatchLocation, SearchMatch,
    format_timestamp,
};
use colored::Colorize;

/// One line per cheatsheet: id, name and last update
pub fn render_summaries(summaries: &[CheatsheetSummary]) -> String {
    let mut out = String::new();
    for summary in summaries {
        let _ = writeln!(
            out,
            "{}  {}  {}",
            summary.id.bright_black(),
            summary.name.bold(),
            format!("updated {}", format_timestamp(summary.updated)).bright_black()
        );
    }
    out
}

/// Section and block outline of a cheatsheet
pub fn render_outline(sheet: &Cheatsheet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", sheet.name().bold(), sheet.id().bright_black());
    let _ = writeln!(
        out,
        "  created {}, updated {}",
        format_timestamp(sheet.created()),
        format_timestamp(sheet.updated())
    );

    for section in sheet.sections() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} {} ({} blocks)",
            "##".cyan(),
            section.title.cyan().bold(),
            section.blocks.len()
        );
        for block in &section.blocks {
            let tag = match &block.kind {
                BlockKind::Code {
                    language: Some(language),
                } => format!("code:{language}"),
                kind => kind.block_type().to_string(),
            };
            let title = block.title.as_deref().unwrap_or("(untitled)");
            let lines = block.content.lines().count();
            let _ = writeln!(
                out,
                "  [{}] {} {}",
                tag.yellow(),
                title,
                format!("{lines} lines").bright_black()
            );
        }
    }
    out
}

/// Search results grouped as `cheatsheet > section > block` breadcrumbs
pub fn render_matches(matches: &[SearchMatch]) -> String {
    let mut out = String::new();
    for found in matches {
        let mut crumbs = vec![found.cheatsheet_name.bold().to_string()];
        match &found.location {
            MatchLocation::Cheatsheet => {},
            MatchLocation::Section { section_title } => {
                crumbs.push(section_title.cyan().to_string());
            },
            MatchLocation::Block {
                section_title,
                block_type,
                block_title,
            } => {
                crumbs.push(section_title.cyan().to_string());
                crumbs.push(
                    block_title
                        .clone()
                        .unwrap_or_else(|| block_type.to_string())
                        .yellow()
                        .to_string(),
                );
            },
        }

        let _ = writeln!(
            out,
            "{} {}",
            crumbs.join(" > "),
            found.cheatsheet_id.bright_black()
        );
        if matches!(found.location, MatchLocation::Block { .. }) {
            for line in found.text.trim_start_matches('\n').lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
    }
    out
}

/// Outcome of a bulk import, successes first
pub fn render_bulk_report(report: &BulkImportReport) -> String {
    let mut out = String::new();
    for entry in &report.success {
        let _ = writeln!(out, "{} {} {}", "✓".green(), entry.name, entry.id.bright_black());
    }
    for entry in &report.failed {
        let _ = writeln!(out, "{} {}: {}", "✗".red(), entry.name, entry.error);
    }
    let _ = writeln!(
        out,
        "Imported {}, failed {}",
        report.success.len(),
        report.failed.len()
    );
    out
}
