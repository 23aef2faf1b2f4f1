//! Storage abstraction for cheatsheets.
//!
//! The [`CheatsheetStore`] trait is the whole-document key-value interface
//! the [`Library`](crate::Library) builds on. Two backends ship with the
//! crate: the filesystem [`Storage`](crate::Storage) and the in-memory
//! [`MemoryStore`].
//!
//! | Method | Purpose |
//! |--------|---------|
//! | [`load`](CheatsheetStore::load) | Fetch one document by id |
//! | [`load_all`](CheatsheetStore::load_all) | Fetch every document |
//! | [`save`](CheatsheetStore::save) | Insert or replace a document |
//! | [`delete`](CheatsheetStore::delete) | Remove a document, reporting whether it existed |
//! | [`list`](CheatsheetStore::list) | Metadata of every document |

pub mod memory;

pub use memory::MemoryStore;

use crate::Result;
use crate::types::{Cheatsheet, CheatsheetSummary};

/// Whole-document store keyed by cheatsheet id.
pub trait CheatsheetStore: Send + Sync {
    /// Fetch a cheatsheet, or `None` when the id is unknown.
    fn load(&self, id: &str) -> Result<Option<Cheatsheet>>;

    /// Fetch every stored cheatsheet, ordered by id.
    fn load_all(&self) -> Result<Vec<Cheatsheet>>;

    /// Insert or replace a cheatsheet.
    fn save(&self, sheet: &Cheatsheet) -> Result<()>;

    /// Remove a cheatsheet. Returns `false` when it did not exist.
    fn delete(&self, id: &str) -> Result<bool>;

    /// Summaries of every stored cheatsheet, ordered by id.
    fn list(&self) -> Result<Vec<CheatsheetSummary>>;

    /// Whether a cheatsheet with `id` is stored.
    fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.load(id)?.is_some())
    }
}
