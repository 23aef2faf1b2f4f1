//! Error types and handling for cheatsheet-core operations.
//!
//! The core transformations (markdown import, markdown export, search) never
//! fail. Everything else returns [`Result<T>`] with one of the variants below.
//!
//! ## Error Categories
//!
//! - **Validation**: a document, section or block violates a structural rule
//! - **Not found**: a requested cheatsheet does not exist in the store
//! - **Storage / I/O**: reading or writing the document store failed
//! - **Serialization**: JSON could not be encoded or decoded
//! - **Configuration**: invalid or unreadable configuration files
//!
//! ```rust
//! use cheatsheet_core::{Error, Result};
//!
//! fn handle(result: Result<()>) {
//!     match result {
//!         Err(Error::Validation { field, .. }) => eprintln!("bad field: {field}"),
//!         Err(e) if e.is_recoverable() => eprintln!("retry later: {e}"),
//!         Err(e) => eprintln!("{} error: {e}", e.category()),
//!         Ok(()) => {},
//!     }
//! }
//! # handle(Ok(()));
//! ```

use thiserror::Error;

/// The main error type for cheatsheet-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A value failed structural validation at construction time.
    ///
    /// `field` names the offending field using its wire name (for example
    /// `type`, `id`, `titleSize`).
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Wire name of the offending field.
        field: String,
        /// Human readable reason.
        message: String,
    },

    /// Requested cheatsheet was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage operation failed beyond basic file I/O.
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a [`Error::Validation`] for `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether retrying the same operation could succeed.
    ///
    /// Only interrupted or timed-out I/O qualifies; validation and lookup
    /// failures are permanent.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Short machine-friendly category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::NotFound(_) => "not_found",
            Self::Storage(_) => "storage",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        // Given: Different error variants
        let errors = vec![
            (Error::validation("type", "unknown block type 'image'"), "Validation error"),
            (Error::NotFound("cs_1".to_string()), "Not found"),
            (Error::Storage("disk full".to_string()), "Storage error"),
            (Error::Serialization("eof".to_string()), "Serialization error"),
            (Error::Config("missing field".to_string()), "Configuration error"),
        ];

        for (error, prefix) in errors {
            // When: Converting to string
            let error_string = error.to_string();

            // Then: Should carry the category prefix
            assert!(error_string.starts_with(prefix), "{error_string}");
        }
    }

    #[test]
    fn test_validation_error_names_field() {
        let error = Error::validation("titleSize", "expected one of sm, md, lg, xl");

        assert_eq!(
            error.to_string(),
            "Validation error: titleSize: expected one of sm, md, lg, xl"
        );
        match error {
            Error::Validation { field, .. } => assert_eq!(field, "titleSize"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_error_from_io_error() {
        let error: Error = io::Error::new(io::ErrorKind::NotFound, "file not found").into();

        assert!(matches!(error, Error::Io(_)));
        assert_eq!(error.category(), "io");
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: Error = json_err.into();

        assert_eq!(error.category(), "serialization");
    }

    #[test]
    fn test_error_recoverability() {
        let recoverable = [
            Error::Io(io::Error::new(io::ErrorKind::TimedOut, "timeout")),
            Error::Io(io::Error::new(io::ErrorKind::Interrupted, "interrupted")),
        ];
        let permanent = [
            Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            Error::validation("id", "must not be empty"),
            Error::NotFound("missing".to_string()),
            Error::Storage("corrupt".to_string()),
        ];

        for error in recoverable {
            assert!(error.is_recoverable(), "Expected {error:?} to be recoverable");
        }
        for error in permanent {
            assert!(!error.is_recoverable(), "Expected {error:?} to be permanent");
        }
    }

    proptest! {
        #[test]
        fn test_validation_error_with_arbitrary_messages(msg in r".{0,200}") {
            let error = Error::validation("content", msg.clone());
            let error_string = error.to_string();

            prop_assert!(error_string.contains("content"));
            prop_assert!(error_string.contains(&msg));
            prop_assert_eq!(error.category(), "validation");
            prop_assert!(!error.is_recoverable());
        }
    }
}
