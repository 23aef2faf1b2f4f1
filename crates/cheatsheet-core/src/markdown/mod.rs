//! Conversion between Markdown text and the cheatsheet model.
//!
//! [`import_markdown`] and [`export_markdown`] are inverse for the subset
//! the importer understands (`##` sections, `###` block titles, paragraphs
//! and fenced code): exporting an imported document and importing the
//! result again reproduces the same sections and blocks, apart from the
//! leading `# {name}` line the exporter adds.

mod export;
mod import;

pub use export::export_markdown;
pub use import::{
    CODE_BLOCK_HEIGHT, DEFAULT_CODE_LANGUAGE, FALLBACK_SECTION_TITLE, IMPORTED_BLOCK_WIDTH,
    TEXT_BLOCK_HEIGHT, import_markdown,
};
