//! # cheatsheet-core
//!
//! Core functionality for cheatsheet - structured, grid-laid-out reference
//! documents that convert to and from Markdown.
//!
//! A cheatsheet is a named list of sections, each holding typed blocks
//! (text, code, tables, lists, checkboxes, calculations and reference
//! cards) positioned on a grid. This crate provides the model, the
//! Markdown importer and exporter, free-text search, and storage.
//!
//! ## Architecture
//!
//! - **Model**: [`Cheatsheet`], [`Section`], [`Block`] and their validating wire records
//! - **Markdown**: single-pass importer and deterministic exporter
//! - **Search**: case-insensitive substring search with context snippets
//! - **Storage**: the [`CheatsheetStore`] trait with filesystem and in-memory backends
//! - **Library**: CRUD, import/export and search composed over a store
//! - **Error Handling**: one error enum with categories and recovery hints
//!
//! The Markdown and search functions are pure and never fail; they do not
//! depend on storage.
//!
//! ## Quick Start
//!
//! ```rust
//! use cheatsheet_core::{export_markdown, import_markdown, search};
//!
//! let sheet = import_markdown("## Shell\n### List\n```sh\nls -la\n```\n", "Unix");
//! assert_eq!(
//!     export_markdown(&sheet),
//!     "# Unix\n\n## Shell\n\n### List\n\n```sh\nls -la\n```\n"
//! );
//!
//! let matches = search([&sheet], "LS -");
//! assert_eq!(matches[0].text, "ls -la");
//! ```

/// Configuration loading and defaults
pub mod config;
/// Error types and result aliases
pub mod error;
/// Identifier generation
pub mod ids;
/// JSON import and export
pub mod json;
/// Document operations over a store
pub mod library;
/// Markdown import and export
pub mod markdown;
/// Free-text search
pub mod search;
/// Local filesystem storage
pub mod storage;
/// Store trait and in-memory backend
pub mod store;
/// Core data types and structures
pub mod types;

// Re-export commonly used types
pub use config::{Config, ImportConfig, PathsConfig, SearchConfig};
pub use error::{Error, Result};
pub use json::{BulkImportReport, FailedEntry, ImportedEntry};
pub use library::{Library, suggested_file_name};
pub use markdown::{export_markdown, import_markdown};
pub use search::{MatchLocation, SearchMatch, search};
pub use storage::Storage;
pub use store::{CheatsheetStore, MemoryStore};
pub use types::*;
