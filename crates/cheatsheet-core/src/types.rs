//! Document model: cheatsheets, sections, blocks and their wire records.
//!
//! Every public model type is built through a validating constructor or a
//! `TryFrom` conversion from its wire record, so a value that exists is
//! structurally valid. The JSON shape is the flat camelCase record the
//! frontend exchanges (`titleColor`, `titleSize`, `referenceData`); block
//! variant data lives in [`BlockKind`] on the Rust side.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, ids};

/// One row of a reference card: a human description and the code it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    /// What the snippet does.
    pub description: String,
    /// The snippet itself, rendered as inline code.
    pub code: String,
}

impl ReferenceRow {
    /// Create a reference row.
    pub fn new(description: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            code: code.into(),
        }
    }
}

/// Wire tag naming a block variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Free text paragraph.
    Text,
    /// Source code with an optional language.
    Code,
    /// Markdown table kept as raw text.
    Table,
    /// Calculation, exported as an unlabeled fence.
    Calculation,
    /// Markdown list kept as raw text.
    List,
    /// Checkbox list kept as raw text.
    Checkbox,
    /// Reference card with description/code rows.
    Reference,
}

impl BlockType {
    /// Every block type, in wire order.
    pub const ALL: [Self; 7] = [
        Self::Text,
        Self::Code,
        Self::Table,
        Self::Calculation,
        Self::List,
        Self::Checkbox,
        Self::Reference,
    ];

    /// Wire name of the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Code => "code",
            Self::Table => "table",
            Self::Calculation => "calculation",
            Self::List => "list",
            Self::Checkbox => "checkbox",
            Self::Reference => "reference",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| {
                Error::validation(
                    "type",
                    format!(
                        "unknown block type '{s}' (expected one of text, code, table, calculation, list, checkbox, reference)"
                    ),
                )
            })
    }
}

/// Position and size of a block on the renderer's grid.
///
/// The core stores these values but never interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridLayout {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
    /// Width in grid units.
    pub w: i64,
    /// Height in grid units.
    pub h: i64,
}

impl GridLayout {
    /// Create a layout from position and size.
    #[must_use]
    pub const fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }
}

/// Variant-specific block data.
///
/// Only code blocks carry a language and only reference blocks carry rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Free text.
    Text,
    /// Source code; `None` exports as `text`.
    Code {
        /// Fence language tag.
        language: Option<String>,
    },
    /// Raw table markdown.
    Table,
    /// Calculation text.
    Calculation,
    /// Raw list markdown.
    List,
    /// Raw checkbox markdown.
    Checkbox,
    /// Reference card.
    Reference {
        /// Rows, if the card has been filled in.
        rows: Option<Vec<ReferenceRow>>,
    },
}

impl BlockKind {
    /// The wire tag for this variant.
    #[must_use]
    pub const fn block_type(&self) -> BlockType {
        match self {
            Self::Text => BlockType::Text,
            Self::Code { .. } => BlockType::Code,
            Self::Table => BlockType::Table,
            Self::Calculation => BlockType::Calculation,
            Self::List => BlockType::List,
            Self::Checkbox => BlockType::Checkbox,
            Self::Reference { .. } => BlockType::Reference,
        }
    }

    /// Build the variant for `ty`, keeping `language` and `rows` only where they apply.
    #[must_use]
    pub fn from_parts(
        ty: BlockType,
        language: Option<String>,
        rows: Option<Vec<ReferenceRow>>,
    ) -> Self {
        match ty {
            BlockType::Text => Self::Text,
            BlockType::Code => Self::Code { language },
            BlockType::Table => Self::Table,
            BlockType::Calculation => Self::Calculation,
            BlockType::List => Self::List,
            BlockType::Checkbox => Self::Checkbox,
            BlockType::Reference => Self::Reference { rows },
        }
    }
}

/// Atomic content unit laid out on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BlockRecord", into = "BlockRecord")]
pub struct Block {
    /// Identifier, unique within the owning cheatsheet.
    pub id: String,
    /// Optional heading shown above the block.
    pub title: Option<String>,
    /// Raw content; meaning depends on [`Block::kind`].
    pub content: String,
    /// Grid placement.
    pub layout: GridLayout,
    /// Variant data.
    pub kind: BlockKind,
}

impl Block {
    /// Create a block.
    ///
    /// Fails with a validation error when `id` is empty.
    pub fn new(
        id: impl Into<String>,
        kind: BlockKind,
        content: impl Into<String>,
        layout: GridLayout,
    ) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::validation("id", "block id must not be empty"));
        }
        Ok(Self {
            id,
            title: None,
            content: content.into(),
            layout,
            kind,
        })
    }

    /// Set the block title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The wire tag of this block.
    #[must_use]
    pub const fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    /// Language of a code block.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Code { language } => language.as_deref(),
            _ => None,
        }
    }

    /// Rows of a reference block.
    #[must_use]
    pub fn reference_rows(&self) -> Option<&[ReferenceRow]> {
        match &self.kind {
            BlockKind::Reference { rows } => rows.as_deref(),
            _ => None,
        }
    }
}

/// Display size of a section title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleSize {
    /// Small.
    Sm,
    /// Medium.
    Md,
    /// Large.
    Lg,
    /// Extra large.
    Xl,
}

impl TitleSize {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

impl FromStr for TitleSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sm" => Ok(Self::Sm),
            "md" => Ok(Self::Md),
            "lg" => Ok(Self::Lg),
            "xl" => Ok(Self::Xl),
            other => Err(Error::validation(
                "titleSize",
                format!("unknown title size '{other}' (expected one of sm, md, lg, xl)"),
            )),
        }
    }
}

/// Named group of blocks. Block order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SectionRecord", into = "SectionRecord")]
pub struct Section {
    /// Identifier.
    pub id: String,
    /// Heading text.
    pub title: String,
    /// Hex color of the heading, if customised.
    pub title_color: Option<String>,
    /// Heading size, if customised.
    pub title_size: Option<TitleSize>,
    /// Blocks in display order.
    pub blocks: Vec<Block>,
}

impl Section {
    /// Create an empty section with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ids::new_section_id(),
            title: title.into(),
            title_color: None,
            title_size: None,
            blocks: Vec::new(),
        }
    }

    /// Replace the block list.
    #[must_use]
    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }
}

/// Top-level structured document.
///
/// `id` and `created` are fixed at construction. Every mutating method
/// refreshes `updated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CheatsheetRecord", into = "CheatsheetRecord")]
pub struct Cheatsheet {
    id: String,
    name: String,
    sections: Vec<Section>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl Cheatsheet {
    /// Create an empty cheatsheet with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = timestamp_now();
        Self {
            id: ids::new_cheatsheet_id(),
            name: name.into(),
            sections: Vec::new(),
            created: now,
            updated: now,
        }
    }

    /// Assemble a cheatsheet from already-built parts.
    ///
    /// Fails with a validation error when `id` is empty.
    pub fn from_parts(
        id: impl Into<String>,
        name: impl Into<String>,
        sections: Vec<Section>,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::validation("id", "cheatsheet id must not be empty"));
        }
        Ok(Self {
            id,
            name: name.into(),
            sections,
            created,
            updated,
        })
    }

    /// Assemble a freshly created cheatsheet whose id is known to be valid.
    pub(crate) const fn assemble(
        id: String,
        name: String,
        sections: Vec<Section>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            sections,
            created: now,
            updated: now,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sections in display order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Creation instant.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Last modification instant.
    #[must_use]
    pub const fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    /// Rename the cheatsheet.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Replace all sections wholesale.
    pub fn replace_sections(&mut self, sections: Vec<Section>) {
        self.sections = sections;
        self.touch();
    }

    /// Apply a partial update. `updated` is refreshed even when nothing changed.
    pub fn apply(&mut self, update: CheatsheetUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(sections) = update.sections {
            self.sections = sections;
        }
        self.touch();
    }

    /// Metadata entry for the store index.
    #[must_use]
    pub fn summary(&self) -> CheatsheetSummary {
        CheatsheetSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            created: self.created,
            updated: self.updated,
        }
    }

    fn touch(&mut self) {
        // Never move backwards if the wall clock does.
        self.updated = timestamp_now().max(self.updated);
    }
}

/// Index entry describing a stored cheatsheet without its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheatsheetSummary {
    /// Cheatsheet id.
    pub id: String,
    /// Cheatsheet name.
    pub name: String,
    /// Creation instant.
    pub created: DateTime<Utc>,
    /// Last modification instant.
    pub updated: DateTime<Utc>,
}

/// Partial update applied by [`Cheatsheet::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheatsheetUpdate {
    /// New name, if renaming.
    #[serde(default)]
    pub name: Option<String>,
    /// New sections, if replacing content.
    #[serde(default)]
    pub sections: Option<Vec<Section>>,
}

/// Current instant at the precision timestamps are stored with (milliseconds).
#[must_use]
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Format a timestamp the way the wire format stores it.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an ISO 8601 timestamp; offset-less values are read as UTC.
pub fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::validation(field, format!("invalid ISO 8601 timestamp '{value}': {e}")))
}

fn require<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| Error::validation(field, "missing required field"))
}

/// Flat JSON record of a [`Block`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    /// Block id.
    pub id: Option<String>,
    /// Type tag.
    #[serde(rename = "type")]
    pub block_type: Option<String>,
    /// Optional title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Raw content.
    pub content: Option<String>,
    /// Column.
    pub x: Option<i64>,
    /// Row.
    pub y: Option<i64>,
    /// Width.
    pub w: Option<i64>,
    /// Height.
    pub h: Option<i64>,
    /// Code language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Reference card rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_data: Option<Vec<ReferenceRow>>,
}

impl TryFrom<BlockRecord> for Block {
    type Error = Error;

    fn try_from(record: BlockRecord) -> Result<Self> {
        let ty: BlockType = require("type", record.block_type)?.parse()?;
        let layout = GridLayout {
            x: require("x", record.x)?,
            y: require("y", record.y)?,
            w: require("w", record.w)?,
            h: require("h", record.h)?,
        };
        let kind = BlockKind::from_parts(ty, record.language, record.reference_data);
        let mut block = Self::new(
            require("id", record.id)?,
            kind,
            require("content", record.content)?,
            layout,
        )?;
        block.title = record.title;
        Ok(block)
    }
}

impl From<Block> for BlockRecord {
    fn from(block: Block) -> Self {
        let block_type = block.block_type();
        let (language, reference_data) = match block.kind {
            BlockKind::Code { language } => (language, None),
            BlockKind::Reference { rows } => (None, rows),
            _ => (None, None),
        };
        Self {
            id: Some(block.id),
            block_type: Some(block_type.as_str().to_string()),
            title: block.title,
            content: Some(block.content),
            x: Some(block.layout.x),
            y: Some(block.layout.y),
            w: Some(block.layout.w),
            h: Some(block.layout.h),
            language,
            reference_data,
        }
    }
}

/// Flat JSON record of a [`Section`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRecord {
    /// Section id.
    pub id: Option<String>,
    /// Heading text.
    pub title: Option<String>,
    /// Hex color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_color: Option<String>,
    /// Size tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_size: Option<String>,
    /// Blocks.
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,
}

impl TryFrom<SectionRecord> for Section {
    type Error = Error;

    fn try_from(record: SectionRecord) -> Result<Self> {
        let id = require("id", record.id)?;
        if id.is_empty() {
            return Err(Error::validation("id", "section id must not be empty"));
        }
        let title_size = record
            .title_size
            .as_deref()
            .map(TitleSize::from_str)
            .transpose()?;
        let blocks = record
            .blocks
            .into_iter()
            .map(Block::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            id,
            title: require("title", record.title)?,
            title_color: record.title_color,
            title_size,
            blocks,
        })
    }
}

impl From<Section> for SectionRecord {
    fn from(section: Section) -> Self {
        Self {
            id: Some(section.id),
            title: Some(section.title),
            title_color: section.title_color,
            title_size: section.title_size.map(|size| size.as_str().to_string()),
            blocks: section.blocks.into_iter().map(BlockRecord::from).collect(),
        }
    }
}

/// Flat JSON record of a [`Cheatsheet`].
///
/// Import paths work on this record directly so they can assign a fresh
/// id and timestamps before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheatsheetRecord {
    /// Cheatsheet id.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Sections.
    #[serde(default)]
    pub sections: Vec<SectionRecord>,
    /// ISO 8601 creation time.
    #[serde(default)]
    pub created: Option<String>,
    /// ISO 8601 modification time.
    #[serde(default)]
    pub updated: Option<String>,
}

impl TryFrom<CheatsheetRecord> for Cheatsheet {
    type Error = Error;

    fn try_from(record: CheatsheetRecord) -> Result<Self> {
        let id = require("id", record.id)?;
        let name = require("name", record.name)?;
        let created = parse_timestamp("created", &require("created", record.created)?)?;
        let updated = parse_timestamp("updated", &require("updated", record.updated)?)?;
        let sections = record
            .sections
            .into_iter()
            .map(Section::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::from_parts(id, name, sections, created, updated)
    }
}

impl From<Cheatsheet> for CheatsheetRecord {
    fn from(sheet: Cheatsheet) -> Self {
        Self {
            id: Some(sheet.id),
            name: Some(sheet.name),
            sections: sheet.sections.into_iter().map(SectionRecord::from).collect(),
            created: Some(format_timestamp(sheet.created)),
            updated: Some(format_timestamp(sheet.updated)),
        }
    }
}
