//! Line-oriented Markdown importer.
//!
//! The importer is a single forward pass. Each line is classified, then fed
//! into an [`ImportState`] that tracks the open section and the pending
//! block. `##` opens a section, `###` opens a titled text block, a fence
//! captures a code block verbatim, any other non-blank line accumulates into
//! the pending text block. Malformed input never fails; it degrades to text
//! blocks under a synthesized "Imported Content" section.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::ids;
use crate::types::{Block, BlockKind, Cheatsheet, GridLayout, Section, timestamp_now};

/// Title of the section synthesized for content outside any `##` heading.
pub const FALLBACK_SECTION_TITLE: &str = "Imported Content";
/// Language recorded for fences without a usable tag.
pub const DEFAULT_CODE_LANGUAGE: &str = "text";
/// Grid width of imported blocks.
pub const IMPORTED_BLOCK_WIDTH: i64 = 6;
/// Grid height of imported text blocks.
pub const TEXT_BLOCK_HEIGHT: i64 = 2;
/// Grid height of imported code blocks.
pub const CODE_BLOCK_HEIGHT: i64 = 3;

const SECTION_MARKER: &str = "## ";
const BLOCK_MARKER: &str = "### ";
pub(crate) const FENCE_MARKER: &str = "```";

/// Convert Markdown text into a new cheatsheet named `name`.
///
/// Never fails. Empty input yields a single empty "Imported Content" section.
///
/// ```rust
/// use cheatsheet_core::markdown::import_markdown;
///
/// let sheet = import_markdown("## API\n### Auth\n```python\nx = 1\n```\n", "Notes");
/// let blocks = &sheet.sections()[0].blocks;
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].language(), Some("python"));
/// ```
pub fn import_markdown(markdown: &str, name: &str) -> Cheatsheet {
    import_with_identity(markdown, name, ids::new_cheatsheet_id(), timestamp_now())
}

pub(crate) fn import_with_identity(
    markdown: &str,
    name: &str,
    id: String,
    now: DateTime<Utc>,
) -> Cheatsheet {
    let sections = markdown
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .fold(ImportState::new(&id), ImportState::step)
        .finish();

    debug!(
        "Imported markdown '{}': {} sections, {} blocks",
        name,
        sections.len(),
        sections.iter().map(|s| s.blocks.len()).sum::<usize>()
    );

    Cheatsheet::assemble(id, name.to_string(), sections, now)
}

/// Structural role of a single input line.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    SectionHeading(&'a str),
    BlockHeading(&'a str),
    Fence { language: Option<&'a str> },
    Blank,
    Text(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    if let Some(rest) = line.strip_prefix(SECTION_MARKER) {
        LineKind::SectionHeading(rest.trim())
    } else if let Some(rest) = line.strip_prefix(BLOCK_MARKER) {
        LineKind::BlockHeading(rest.trim())
    } else if let Some(rest) = line.strip_prefix(FENCE_MARKER) {
        LineKind::Fence {
            language: fence_language(rest),
        }
    } else if line.trim().is_empty() {
        LineKind::Blank
    } else {
        LineKind::Text(line)
    }
}

/// Word characters directly following the fence marker, if any.
fn fence_language(rest: &str) -> Option<&str> {
    let end = rest
        .char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
        .map_or(rest.len(), |(idx, _)| idx);
    (end > 0).then(|| &rest[..end])
}

#[derive(Debug)]
struct PendingText {
    title: Option<String>,
    content: String,
}

#[derive(Debug)]
struct PendingCode {
    title: Option<String>,
    language: String,
    lines: Vec<String>,
}

/// What the importer is in the middle of.
#[derive(Debug)]
enum Mode {
    Idle,
    Text(PendingText),
    Fence(PendingCode),
}

struct ImportState<'a> {
    cheatsheet_id: &'a str,
    sections: Vec<Section>,
    section: Option<Section>,
    mode: Mode,
    counter: u32,
}

impl<'a> ImportState<'a> {
    const fn new(cheatsheet_id: &'a str) -> Self {
        Self {
            cheatsheet_id,
            sections: Vec::new(),
            section: None,
            mode: Mode::Idle,
            counter: 0,
        }
    }

    fn step(mut self, line: &str) -> Self {
        let mode = std::mem::replace(&mut self.mode, Mode::Idle);
        self.mode = match mode {
            Mode::Fence(mut code) => {
                if line.starts_with(FENCE_MARKER) {
                    self.flush(Mode::Fence(code));
                    Mode::Idle
                } else {
                    code.lines.push(line.to_string());
                    Mode::Fence(code)
                }
            },
            pending => self.advance(pending, classify(line)),
        };
        self
    }

    fn advance(&mut self, pending: Mode, line: LineKind<'_>) -> Mode {
        match line {
            LineKind::SectionHeading(title) => {
                self.flush(pending);
                self.close_section();
                self.section = Some(Section::new(title));
                Mode::Idle
            },
            LineKind::BlockHeading(title) => {
                self.flush(pending);
                Mode::Text(PendingText {
                    title: Some(title.to_string()),
                    content: String::new(),
                })
            },
            LineKind::Fence { language } => {
                // A bare `###` heading titles the code block that follows it.
                let title = match pending {
                    Mode::Text(text) if text.content.is_empty() => text.title,
                    other => {
                        self.flush(other);
                        None
                    },
                };
                Mode::Fence(PendingCode {
                    title,
                    language: language.unwrap_or(DEFAULT_CODE_LANGUAGE).to_string(),
                    lines: Vec::new(),
                })
            },
            LineKind::Blank => pending,
            LineKind::Text(text) => {
                self.open_section();
                match pending {
                    Mode::Text(mut block) => {
                        block.content.push('\n');
                        block.content.push_str(text);
                        Mode::Text(block)
                    },
                    other => {
                        self.flush(other);
                        Mode::Text(PendingText {
                            title: None,
                            content: text.to_string(),
                        })
                    },
                }
            },
        }
    }

    fn flush(&mut self, mode: Mode) {
        match mode {
            Mode::Idle => {},
            Mode::Text(text) => {
                if text.title.is_some() || !text.content.is_empty() {
                    self.emit(BlockKind::Text, text.title, text.content, TEXT_BLOCK_HEIGHT);
                }
            },
            Mode::Fence(code) => {
                let kind = BlockKind::Code {
                    language: Some(code.language),
                };
                self.emit(kind, code.title, code.lines.join("\n"), CODE_BLOCK_HEIGHT);
            },
        }
    }

    fn emit(&mut self, kind: BlockKind, title: Option<String>, content: String, height: i64) {
        self.counter += 1;
        let block = Block {
            id: ids::block_id(self.cheatsheet_id, self.counter),
            title,
            content,
            layout: GridLayout::new(0, i64::from(self.counter) - 1, IMPORTED_BLOCK_WIDTH, height),
            kind,
        };
        self.open_section().blocks.push(block);
    }

    fn open_section(&mut self) -> &mut Section {
        self.section
            .get_or_insert_with(|| Section::new(FALLBACK_SECTION_TITLE))
    }

    fn close_section(&mut self) {
        if let Some(section) = self.section.take() {
            self.sections.push(section);
        }
    }

    fn finish(mut self) -> Vec<Section> {
        let mode = std::mem::replace(&mut self.mode, Mode::Idle);
        self.flush(mode);
        self.close_section();
        if self.sections.is_empty() {
            self.sections.push(Section::new(FALLBACK_SECTION_TITLE));
        }
        self.sections
    }
}
