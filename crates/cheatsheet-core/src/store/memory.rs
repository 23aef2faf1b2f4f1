//! In-memory [`CheatsheetStore`] for tests and embedding.
//!
//! Documents live in a `BTreeMap` behind a `RwLock`, so iteration is in id
//! order like the filesystem index.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::types::{Cheatsheet, CheatsheetSummary};
use crate::{Error, Result};

use super::CheatsheetStore;

/// Volatile store holding cheatsheets in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sheets: RwLock<BTreeMap<String, Cheatsheet>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored cheatsheets.
    pub fn len(&self) -> Result<usize> {
        Ok(self.sheets.read().map_err(poisoned)?.len())
    }

    /// Whether the store holds no cheatsheets.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(_: PoisonError<T>) -> Error {
    Error::Storage("memory store lock poisoned".to_string())
}

impl CheatsheetStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Option<Cheatsheet>> {
        Ok(self.sheets.read().map_err(poisoned)?.get(id).cloned())
    }

    fn load_all(&self) -> Result<Vec<Cheatsheet>> {
        Ok(self.sheets.read().map_err(poisoned)?.values().cloned().collect())
    }

    fn save(&self, sheet: &Cheatsheet) -> Result<()> {
        self.sheets
            .write()
            .map_err(poisoned)?
            .insert(sheet.id().to_string(), sheet.clone());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.sheets.write().map_err(poisoned)?.remove(id).is_some())
    }

    fn list(&self) -> Result<Vec<CheatsheetSummary>> {
        Ok(self
            .sheets
            .read()
            .map_err(poisoned)?
            .values()
            .map(Cheatsheet::summary)
            .collect())
    }

    fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.sheets.read().map_err(poisoned)?.contains_key(id))
    }
}
