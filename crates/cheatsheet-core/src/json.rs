//! JSON import and export of whole cheatsheets.
//!
//! Exports are pretty-printed UTF-8. Imports go through [`CheatsheetRecord`]
//! so the caller can assign a fresh id and timestamps before the record is
//! validated into a [`Cheatsheet`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Cheatsheet, CheatsheetRecord, Section};
use crate::{Error, Result};

/// File name suggested for a bulk export.
pub const ALL_CHEATSHEETS_FILE_NAME: &str = "all_cheatsheets.json";

/// Name reported for bulk entries that do not carry a readable name.
const UNKNOWN_NAME: &str = "Unknown";

/// Serialize one cheatsheet as pretty JSON.
pub fn export_json(sheet: &Cheatsheet) -> Result<String> {
    Ok(serde_json::to_string_pretty(sheet)?)
}

/// Serialize many cheatsheets as a pretty JSON array.
pub fn export_all_json(sheets: &[Cheatsheet]) -> Result<String> {
    Ok(serde_json::to_string_pretty(sheets)?)
}

/// Parse a single cheatsheet record without validating it.
pub fn parse_record(text: &str) -> Result<CheatsheetRecord> {
    Ok(serde_json::from_str(text)?)
}

/// Parse a bulk import payload into its raw entries.
///
/// Entries stay untyped so one malformed entry cannot fail the batch.
pub fn parse_bulk(text: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(entries) => Ok(entries),
        other => Err(Error::validation(
            "content",
            format!("expected a JSON array of cheatsheets, found {}", json_kind(&other)),
        )),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Best-effort display name of a raw bulk entry.
#[must_use]
pub fn entry_name(entry: &Value) -> String {
    entry
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_NAME)
        .to_string()
}

/// Validate `record` into a cheatsheet with the given identity.
///
/// Any id and timestamps carried by the record are replaced.
pub fn instantiate(record: CheatsheetRecord, id: String, now: DateTime<Utc>) -> Result<Cheatsheet> {
    let name = record
        .name
        .ok_or_else(|| Error::validation("name", "missing required field"))?;
    let sections = record
        .sections
        .into_iter()
        .map(Section::try_from)
        .collect::<Result<Vec<_>>>()?;
    Cheatsheet::from_parts(id, name, sections, now, now)
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkImportReport {
    /// Entries that were stored.
    pub success: Vec<ImportedEntry>,
    /// Entries that were rejected.
    pub failed: Vec<FailedEntry>,
}

/// A stored bulk entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedEntry {
    /// Cheatsheet name.
    pub name: String,
    /// Newly assigned id.
    pub id: String,
}

/// A rejected bulk entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedEntry {
    /// Entry name, or "Unknown".
    pub name: String,
    /// Why it was rejected.
    pub error: String,
}
