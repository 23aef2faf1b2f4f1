//! Deterministic Markdown serializer.

use crate::types::{Block, BlockKind, Cheatsheet, ReferenceRow};

use super::import::{DEFAULT_CODE_LANGUAGE, FENCE_MARKER};

const REFERENCE_HEADER: &str = "| Description | Code |";
const REFERENCE_SEPARATOR: &str = "|-------------|------|";

/// Render a cheatsheet as Markdown.
///
/// Elements (headings, paragraphs, fences, tables) are separated by exactly
/// one blank line and the output ends with a single newline. The same input
/// always yields byte-identical output.
#[must_use]
pub fn export_markdown(sheet: &Cheatsheet) -> String {
    let mut elements = vec![format!("# {}", sheet.name())];

    for section in sheet.sections() {
        elements.push(format!("## {}", section.title));
        for block in &section.blocks {
            if let Some(title) = &block.title {
                elements.push(format!("### {title}"));
            }
            elements.extend(render_body(block));
        }
    }

    let mut out = elements.join("\n\n");
    out.push('\n');
    out
}

fn render_body(block: &Block) -> Option<String> {
    match &block.kind {
        BlockKind::Text | BlockKind::Table | BlockKind::List | BlockKind::Checkbox => {
            (!block.content.is_empty()).then(|| block.content.clone())
        },
        BlockKind::Code { language } => Some(fence(
            language.as_deref().unwrap_or(DEFAULT_CODE_LANGUAGE),
            &block.content,
        )),
        BlockKind::Calculation => Some(fence("", &block.content)),
        BlockKind::Reference { rows } => rows
            .as_deref()
            .filter(|rows| !rows.is_empty())
            .map(reference_table),
    }
}

fn fence(language: &str, content: &str) -> String {
    format!("{FENCE_MARKER}{language}\n{content}\n{FENCE_MARKER}")
}

fn reference_table(rows: &[ReferenceRow]) -> String {
    let mut lines = vec![REFERENCE_HEADER.to_string(), REFERENCE_SEPARATOR.to_string()];
    lines.extend(rows.iter().map(|row| {
        format!(
            "| {} | {} |",
            escape_cell(&row.description),
            inline_code(&escape_cell(&row.code))
        )
    }));
    lines.join("\n")
}

/// Keep a value on one table row without closing the cell early.
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn inline_code(code: &str) -> String {
    if code.contains('`') {
        format!("`` {code} ``")
    } else {
        format!("`{code}`")
    }
}
