use crate::store::CheatsheetStore;
use crate::types::{Cheatsheet, CheatsheetSummary};
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Maximum allowed id length; ids double as file names
const MAX_ID_LEN: usize = 128;

const CHEATSHEETS_DIR: &str = "cheatsheets";
const INDEX_FILE: &str = "index.json";

type Index = BTreeMap<String, CheatsheetSummary>;

/// Filesystem storage for cheatsheets.
///
/// Layout under the root directory:
///
/// ```text
/// root/
/// ├── index.json            id -> {id, name, created, updated}
/// └── cheatsheets/
///     └── {id}.json         full document, pretty JSON
/// ```
///
/// Every file is written to a temporary sibling first and renamed into
/// place, so readers never observe a half-written document. There is no
/// cross-process locking.
pub struct Storage {
    root_dir: PathBuf,
}

impl Storage {
    /// Creates a storage rooted at `root_dir`, creating directories as needed
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Result<Self> {
        let root_dir = root_dir.into();
        fs::create_dir_all(root_dir.join(CHEATSHEETS_DIR))
            .map_err(|e| Error::Storage(format!("Failed to create data directory: {e}")))?;
        debug!("Opened cheatsheet storage at {}", root_dir.display());
        Ok(Self { root_dir })
    }

    /// Returns the root data directory path
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Returns the path of the metadata index
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.root_dir.join(INDEX_FILE)
    }

    /// Returns the path of the document file for `id`
    pub fn cheatsheet_path(&self, id: &str) -> Result<PathBuf> {
        // Validate id to prevent directory traversal
        Self::validate_id(id)?;
        Ok(self
            .root_dir
            .join(CHEATSHEETS_DIR)
            .join(format!("{id}.json")))
    }

    /// Validate that an id is safe to use as a file name
    fn validate_id(id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Error::validation("id", "id cannot be empty"));
        }

        if id.len() > MAX_ID_LEN {
            return Err(Error::validation(
                "id",
                format!("id exceeds maximum length of {MAX_ID_LEN} characters"),
            ));
        }

        if id.starts_with('-') {
            return Err(Error::validation(
                "id",
                format!("invalid id '{id}': cannot start with '-'"),
            ));
        }

        // Only allow ASCII alphanumeric, dash, underscore. This also rules out
        // separators and dots, so no traversal is possible.
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::validation(
                "id",
                format!("invalid id '{id}': only [A-Za-z0-9_-] are allowed"),
            ));
        }

        Ok(())
    }

    fn read_index(&self) -> Result<Index> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(Index::new());
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| Error::Storage(format!("Failed to read index: {e}")))?;
        serde_json::from_str(&json)
            .map_err(|e| Error::Storage(format!("Failed to parse index: {e}")))
    }

    fn write_index(&self, index: &Index) -> Result<()> {
        let json = serde_json::to_string_pretty(index)
            .map_err(|e| Error::Storage(format!("Failed to serialize index: {e}")))?;
        Self::write_atomic(&self.index_path(), &json, "index")
    }

    fn write_atomic(path: &Path, contents: &str, what: &str) -> Result<()> {
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)
            .map_err(|e| Error::Storage(format!("Failed to write temp {what}: {e}")))?;

        #[cfg(target_os = "windows")]
        if path.exists() {
            fs::remove_file(path)
                .map_err(|e| Error::Storage(format!("Failed to remove existing {what}: {e}")))?;
        }

        fs::rename(&tmp_path, path)
            .map_err(|e| Error::Storage(format!("Failed to commit {what}: {e}")))
    }
}

impl CheatsheetStore for Storage {
    fn load(&self, id: &str) -> Result<Option<Cheatsheet>> {
        let path = self.cheatsheet_path(id)?;
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)?;
        let sheet = serde_json::from_str(&json)
            .map_err(|e| Error::Storage(format!("Failed to parse cheatsheet '{id}': {e}")))?;
        Ok(Some(sheet))
    }

    fn load_all(&self) -> Result<Vec<Cheatsheet>> {
        let index = self.read_index()?;
        let mut sheets = Vec::with_capacity(index.len());
        for id in index.keys() {
            match self.load(id)? {
                Some(sheet) => sheets.push(sheet),
                None => warn!("Index lists '{}' but its file is missing; skipping", id),
            }
        }
        Ok(sheets)
    }

    fn save(&self, sheet: &Cheatsheet) -> Result<()> {
        let path = self.cheatsheet_path(sheet.id())?;
        let json = serde_json::to_string_pretty(sheet)
            .map_err(|e| Error::Storage(format!("Failed to serialize cheatsheet: {e}")))?;
        Self::write_atomic(&path, &json, "cheatsheet")?;

        let mut index = self.read_index()?;
        index.insert(sheet.id().to_string(), sheet.summary());
        self.write_index(&index)?;

        debug!("Saved cheatsheet {} ({})", sheet.id(), sheet.name());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let path = self.cheatsheet_path(id)?;
        let had_file = path.exists();
        if had_file {
            fs::remove_file(&path)
                .map_err(|e| Error::Storage(format!("Failed to remove cheatsheet '{id}': {e}")))?;
        }

        let mut index = self.read_index()?;
        let had_entry = index.remove(id).is_some();
        if had_entry {
            self.write_index(&index)?;
        }

        if had_file || had_entry {
            info!("Deleted cheatsheet {}", id);
        }
        Ok(had_file || had_entry)
    }

    fn list(&self) -> Result<Vec<CheatsheetSummary>> {
        Ok(self.read_index()?.into_values().collect())
    }

    fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.cheatsheet_path(id)?.exists())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::Section;
    use tempfile::TempDir;

    fn create_test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let storage = Storage::with_root(temp_dir.path()).expect("Failed to create storage");
        (storage, temp_dir)
    }

    #[test]
    fn test_storage_creation_with_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("nested").join("data");

        let storage = Storage::with_root(&root).expect("Should create storage");

        assert_eq!(storage.root_dir(), root);
        assert!(root.join("cheatsheets").is_dir());
        assert_eq!(storage.index_path(), root.join("index.json"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (storage, _temp_dir) = create_test_storage();
        let mut sheet = Cheatsheet::new("Git");
        sheet.replace_sections(vec![Section::new("Branches")]);

        storage.save(&sheet).expect("Should save");

        let loaded = storage.load(sheet.id()).unwrap().expect("Should exist");
        assert_eq!(loaded.name(), "Git");
        assert_eq!(loaded.sections()[0].title, "Branches");
        assert!(storage.cheatsheet_path(sheet.id()).unwrap().exists());
    }

    #[test]
    fn test_save_updates_index() {
        let (storage, _temp_dir) = create_test_storage();
        let mut sheet = Cheatsheet::new("Before");
        storage.save(&sheet).unwrap();

        sheet.rename("After");
        storage.save(&sheet).unwrap();

        let list = storage.list().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "After");

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(storage.index_path()).unwrap()).unwrap();
        assert_eq!(raw[sheet.id()]["name"], "After");
        assert_eq!(raw[sheet.id()]["id"], sheet.id());
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let (storage, temp_dir) = create_test_storage();
        storage.save(&Cheatsheet::new("Atomic")).unwrap();

        let leftovers: Vec<_> = fs::read_dir(temp_dir.path().join("cheatsheets"))
            .unwrap()
            .chain(fs::read_dir(temp_dir.path()).unwrap())
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "{leftovers:?}");
    }

    #[test]
    fn test_load_missing_returns_none() {
        let (storage, _temp_dir) = create_test_storage();
        assert!(storage.load("cs_missing").unwrap().is_none());
        assert!(!storage.contains("cs_missing").unwrap());
    }

    #[test]
    fn test_delete() {
        let (storage, _temp_dir) = create_test_storage();
        let sheet = Cheatsheet::new("Doomed");
        storage.save(&sheet).unwrap();

        assert!(storage.delete(sheet.id()).unwrap());
        assert!(storage.load(sheet.id()).unwrap().is_none());
        assert!(storage.list().unwrap().is_empty());
        assert!(!storage.delete(sheet.id()).unwrap());
    }

    #[test]
    fn test_load_all_skips_missing_files() {
        let (storage, _temp_dir) = create_test_storage();
        let kept = Cheatsheet::new("Kept");
        let lost = Cheatsheet::new("Lost");
        storage.save(&kept).unwrap();
        storage.save(&lost).unwrap();

        // Given: a document file removed behind the index's back
        fs::remove_file(storage.cheatsheet_path(lost.id()).unwrap()).unwrap();

        // Then: it is skipped rather than failing the whole listing
        let all = storage.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), kept.id());
    }

    #[test]
    fn test_invalid_id_validation() {
        let (storage, _temp_dir) = create_test_storage();

        let long = "a".repeat(MAX_ID_LEN + 1);
        let invalid = ["", "../etc/passwd", "a/b", "a\\b", ".hidden", "-flag", "sp ace", long.as_str()];
        for id in invalid {
            let result = storage.cheatsheet_path(id);
            assert!(
                matches!(result, Err(Error::Validation { ref field, .. }) if field == "id"),
                "id {id:?} should be rejected"
            );
        }

        for id in ["cs_0190f3c2", "legacy-123", "ABC_def"] {
            assert!(storage.cheatsheet_path(id).is_ok(), "id {id:?} should be accepted");
        }
    }

    #[test]
    fn test_corrupt_document_is_storage_error() {
        let (storage, _temp_dir) = create_test_storage();
        fs::write(storage.cheatsheet_path("cs_bad").unwrap(), "{\"id\": \"cs_bad\"").unwrap();

        let err = storage.load("cs_bad").unwrap_err();
        assert_eq!(err.category(), "storage");
    }

    #[test]
    fn test_unreadable_document_is_io_error() {
        // Given: a directory where the document file should be
        let (storage, _temp_dir) = create_test_storage();
        fs::create_dir(storage.cheatsheet_path("cs_dir").unwrap()).unwrap();

        // When
        let err = storage.load("cs_dir").unwrap_err();

        // Then
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.category(), "io");
    }
}
