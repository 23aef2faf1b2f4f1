//! Cheatsheet service: the core transformations composed with a store.
//!
//! [`Library`] owns a [`CheatsheetStore`] and exposes the document-level
//! operations a front end needs: CRUD, Markdown and JSON import/export,
//! bulk import and search.

use tracing::{debug, info, warn};

use crate::config::{Config, ImportConfig};
use crate::json::{self, BulkImportReport, FailedEntry, ImportedEntry};
use crate::markdown;
use crate::search::{self, SearchMatch};
use crate::storage::Storage;
use crate::store::CheatsheetStore;
use crate::types::{Cheatsheet, CheatsheetSummary, CheatsheetUpdate, timestamp_now};
use crate::{Error, Result, ids};

/// Document operations over a [`CheatsheetStore`].
///
/// ```rust
/// use cheatsheet_core::{Library, MemoryStore};
///
/// let library = Library::new(MemoryStore::new());
/// let sheet = library.import_markdown("## Git\n```sh\ngit status\n```", Some("Git"))?;
/// assert_eq!(library.search("status")?.len(), 1);
/// assert!(library.export_markdown(sheet.id())?.starts_with("# Git\n"));
/// # Ok::<(), cheatsheet_core::Error>(())
/// ```
pub struct Library<S: CheatsheetStore> {
    store: S,
    import: ImportConfig,
}

impl Library<Storage> {
    /// Open the filesystem library described by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        let storage = Storage::with_root(&config.paths.root)?;
        Ok(Self::new(storage).with_import_config(config.import.clone()))
    }
}

impl<S: CheatsheetStore> Library<S> {
    /// Wrap `store` with default import settings.
    pub fn new(store: S) -> Self {
        Self {
            store,
            import: ImportConfig::default(),
        }
    }

    /// Replace the import settings.
    #[must_use]
    pub fn with_import_config(mut self, import: ImportConfig) -> Self {
        self.import = import;
        self
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Create and store an empty cheatsheet.
    pub fn create(&self, name: &str) -> Result<Cheatsheet> {
        let sheet = Cheatsheet::new(name);
        self.store.save(&sheet)?;
        info!("Created cheatsheet {} ({})", sheet.id(), sheet.name());
        Ok(sheet)
    }

    /// Fetch a cheatsheet.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no cheatsheet has this id.
    pub fn get(&self, id: &str) -> Result<Cheatsheet> {
        self.store
            .load(id)?
            .ok_or_else(|| Error::NotFound(format!("cheatsheet '{id}'")))
    }

    /// Summaries of every stored cheatsheet.
    pub fn list(&self) -> Result<Vec<CheatsheetSummary>> {
        self.store.list()
    }

    /// Every stored cheatsheet.
    pub fn all(&self) -> Result<Vec<Cheatsheet>> {
        self.store.load_all()
    }

    /// Apply a partial update and store the result.
    pub fn update(&self, id: &str, update: CheatsheetUpdate) -> Result<Cheatsheet> {
        let mut sheet = self.get(id)?;
        sheet.apply(update);
        self.store.save(&sheet)?;
        debug!("Updated cheatsheet {}", id);
        Ok(sheet)
    }

    /// Delete a cheatsheet.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no cheatsheet has this id.
    pub fn delete(&self, id: &str) -> Result<()> {
        if self.store.delete(id)? {
            Ok(())
        } else {
            Err(Error::NotFound(format!("cheatsheet '{id}'")))
        }
    }

    /// Import Markdown text as a new cheatsheet.
    ///
    /// Without a (non-blank) `name` the configured default name is used.
    ///
    /// # Errors
    ///
    /// A validation error on field `content` when `text` is empty.
    pub fn import_markdown(&self, text: &str, name: Option<&str>) -> Result<Cheatsheet> {
        if text.is_empty() {
            return Err(Error::validation("content", "no markdown content provided"));
        }
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(self.import.default_name.as_str());

        let sheet = markdown::import_markdown(text, name);
        self.store.save(&sheet)?;
        info!("Imported markdown as {} ({})", sheet.id(), sheet.name());
        Ok(sheet)
    }

    /// Import one cheatsheet from JSON.
    ///
    /// The stored id is kept unless it is missing, blank, already taken or
    /// not usable by the store, in which case a fresh one is assigned.
    /// Timestamps are reset to now.
    pub fn import_json(&self, text: &str) -> Result<Cheatsheet> {
        let mut record = json::parse_record(text)?;
        let id = match record.id.take() {
            Some(id) if !id.trim().is_empty() && self.id_is_free(&id)? => id,
            _ => ids::new_cheatsheet_id(),
        };

        let sheet = json::instantiate(record, id, timestamp_now())?;
        self.store.save(&sheet)?;
        info!("Imported JSON as {} ({})", sheet.id(), sheet.name());
        Ok(sheet)
    }

    /// Whether `id` can be stored as-is. Ids the store rejects count as taken.
    fn id_is_free(&self, id: &str) -> Result<bool> {
        match self.store.contains(id) {
            Ok(taken) => Ok(!taken),
            Err(Error::Validation { message, .. }) => {
                debug!("Replacing unusable id '{}': {}", id, message);
                Ok(false)
            },
            Err(e) => Err(e),
        }
    }

    /// Import a JSON array of cheatsheets, each with a fresh id.
    ///
    /// Invalid entries are reported in [`BulkImportReport::failed`] without
    /// aborting the rest of the batch.
    ///
    /// # Errors
    ///
    /// Fails only when `text` is not a JSON array.
    pub fn import_bulk(&self, text: &str) -> Result<BulkImportReport> {
        let mut report = BulkImportReport::default();

        for entry in json::parse_bulk(text)? {
            let name = json::entry_name(&entry);
            let outcome = serde_json::from_value(entry)
                .map_err(Error::from)
                .and_then(|record| {
                    json::instantiate(record, ids::new_cheatsheet_id(), timestamp_now())
                })
                .and_then(|sheet| self.store.save(&sheet).map(|()| sheet));

            match outcome {
                Ok(sheet) => report.success.push(ImportedEntry {
                    name: sheet.name().to_string(),
                    id: sheet.id().to_string(),
                }),
                Err(e) => {
                    warn!("Skipping bulk entry '{}': {}", name, e);
                    report.failed.push(FailedEntry {
                        name,
                        error: e.to_string(),
                    });
                },
            }
        }

        info!(
            "Bulk import finished: {} imported, {} failed",
            report.success.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Render a stored cheatsheet as Markdown.
    pub fn export_markdown(&self, id: &str) -> Result<String> {
        Ok(markdown::export_markdown(&self.get(id)?))
    }

    /// Render a stored cheatsheet as pretty JSON.
    pub fn export_json(&self, id: &str) -> Result<String> {
        json::export_json(&self.get(id)?)
    }

    /// Render every stored cheatsheet as a pretty JSON array.
    pub fn export_all_json(&self) -> Result<String> {
        json::export_all_json(&self.all()?)
    }

    /// Search every stored cheatsheet.
    pub fn search(&self, query: &str) -> Result<Vec<SearchMatch>> {
        Ok(search::search(&self.all()?, query))
    }
}

/// File name for exporting `sheet` with extension `extension`.
///
/// Path separators and control characters in the name become `_`.
#[must_use]
pub fn suggested_file_name(sheet: &Cheatsheet, extension: &str) -> String {
    let stem: String = sheet
        .name()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') || c.is_control() { '_' } else { c })
        .collect();
    let stem = match stem.trim() {
        "" | "." | ".." => "cheatsheet",
        trimmed => trimmed,
    };
    format!("{stem}.{extension}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::Section;
    use serde_json::json;

    fn library() -> Library<MemoryStore> {
        Library::new(MemoryStore::new())
    }

    #[test]
    fn test_create_get_list_delete() {
        let library = library();

        let sheet = library.create("Docker").unwrap();

        assert_eq!(library.get(sheet.id()).unwrap(), sheet);
        assert_eq!(library.list().unwrap(), vec![sheet.summary()]);

        library.delete(sheet.id()).unwrap();
        assert!(matches!(library.get(sheet.id()), Err(Error::NotFound(_))));
        assert!(matches!(library.delete(sheet.id()), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_update_applies_fields_and_refreshes_timestamp() {
        let library = library();
        let sheet = library.create("Old").unwrap();

        let updated = library
            .update(
                sheet.id(),
                CheatsheetUpdate {
                    name: Some("New".into()),
                    sections: Some(vec![Section::new("One")]),
                },
            )
            .unwrap();

        assert_eq!(updated.name(), "New");
        assert_eq!(updated.sections().len(), 1);
        assert_eq!(updated.created(), sheet.created());
        assert!(updated.updated() >= sheet.updated());
        assert_eq!(library.get(sheet.id()).unwrap(), updated);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let err = library()
            .update("cs_nope", CheatsheetUpdate::default())
            .unwrap_err();
        assert_eq!(err.category(), "not_found");
    }

    #[test]
    fn test_import_markdown_names() {
        let library = library().with_import_config(ImportConfig {
            default_name: "Fallback".into(),
        });

        let named = library.import_markdown("text", Some("Mine")).unwrap();
        let unnamed = library.import_markdown("text", None).unwrap();
        let blank = library.import_markdown("text", Some("  ")).unwrap();

        assert_eq!(named.name(), "Mine");
        assert_eq!(unnamed.name(), "Fallback");
        assert_eq!(blank.name(), "Fallback");
        assert_eq!(library.list().unwrap().len(), 3);
    }

    #[test]
    fn test_import_markdown_rejects_empty() {
        let err = library().import_markdown("", Some("x")).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "content"));
    }

    #[test]
    fn test_import_json_keeps_free_id_and_resets_timestamps() {
        let library = library();
        let text = json!({
            "id": "cs_legacy_1",
            "name": "Legacy",
            "created": "2020-01-01T00:00:00",
            "updated": "2020-01-01T00:00:00",
            "sections": []
        })
        .to_string();

        let first = library.import_json(&text).unwrap();
        let second = library.import_json(&text).unwrap();

        assert_eq!(first.id(), "cs_legacy_1");
        assert_ne!(second.id(), "cs_legacy_1");
        assert!(second.id().starts_with("cs_"));
        assert!(first.created().timestamp() > 1_600_000_000);
        assert_eq!(library.list().unwrap().len(), 2);
    }

    #[test]
    fn test_import_json_replaces_id_unusable_as_file_name() {
        // Given: a filesystem library and a document whose id has a space
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let library = Library::new(Storage::with_root(temp_dir.path()).unwrap());
        let text = json!({"id": "my sheet", "name": "Spaced", "sections": []}).to_string();

        // When
        let sheet = library.import_json(&text).unwrap();

        // Then: a fresh id is assigned and the document is stored
        assert!(sheet.id().starts_with("cs_"));
        assert_eq!(library.get(sheet.id()).unwrap().name(), "Spaced");
        assert_eq!(library.list().unwrap().len(), 1);
    }

    #[test]
    fn test_import_json_without_id() {
        let sheet = library().import_json(r#"{"name": "No id"}"#).unwrap();
        assert!(sheet.id().starts_with("cs_"));
    }

    #[test]
    fn test_import_bulk_collects_failures() {
        // Given: two valid entries, one invalid block type, one non-object
        let library = library();
        let text = json!([
            {"id": "cs_same", "name": "A", "sections": []},
            {"id": "cs_same", "name": "B", "sections": []},
            {"name": "Broken", "sections": [{"id": "s", "title": "t", "blocks": [
                {"id": "b", "type": "gif", "content": "", "x": 0, "y": 0, "w": 1, "h": 1}
            ]}]},
            42
        ])
        .to_string();

        // When
        let report = library.import_bulk(&text).unwrap();

        // Then: valid entries get distinct fresh ids, failures are named
        assert_eq!(report.success.len(), 2);
        assert_ne!(report.success[0].id, report.success[1].id);
        assert!(report.success.iter().all(|e| e.id != "cs_same"));
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].name, "Broken");
        assert!(report.failed[0].error.contains("type"));
        assert_eq!(report.failed[1].name, "Unknown");
        assert_eq!(library.list().unwrap().len(), 2);
    }

    #[test]
    fn test_import_bulk_rejects_non_array() {
        assert!(library().import_bulk("{}").is_err());
    }

    #[test]
    fn test_exports_and_search() {
        let library = library();
        let sheet = library
            .import_markdown("## Tools\n### Find\n```sh\nfind . -name x\n```", Some("Unix"))
            .unwrap();

        let markdown = library.export_markdown(sheet.id()).unwrap();
        assert_eq!(
            markdown,
            "# Unix\n\n## Tools\n\n### Find\n\n```sh\nfind . -name x\n```\n"
        );

        let json_text = library.export_json(sheet.id()).unwrap();
        let back: Cheatsheet = serde_json::from_str(&json_text).unwrap();
        assert_eq!(back, sheet);

        let all: Vec<serde_json::Value> =
            serde_json::from_str(&library.export_all_json().unwrap()).unwrap();
        assert_eq!(all.len(), 1);

        let matches = library.search("FIND").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "find . -name x");
    }

    #[test]
    fn test_suggested_file_name() {
        assert_eq!(suggested_file_name(&Cheatsheet::new("Go Basics"), "md"), "Go Basics.md");
        assert_eq!(suggested_file_name(&Cheatsheet::new("a/b\\c"), "json"), "a_b_c.json");
        assert_eq!(suggested_file_name(&Cheatsheet::new("  "), "md"), "cheatsheet.md");
        assert_eq!(suggested_file_name(&Cheatsheet::new(".."), "md"), "cheatsheet.md");
    }
}
