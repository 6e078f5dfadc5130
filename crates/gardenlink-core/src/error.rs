//! Error types for the Gardenlink engine.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! Unresolved links and malformed markup are *not* errors; they degrade to
//! literal text or are omitted from derived link lists.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all Gardenlink operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Parse error (frontmatter, configuration files)
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// A query ran before the corpus snapshot was loaded and indexed.
    #[error("Corpus index has not been built; load a corpus before querying")]
    IndexNotBuilt,

    /// The requested slug is not part of the corpus
    #[error("Note not found: {slug}")]
    NoteNotFound { slug: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a note-not-found error
    pub fn not_found(slug: impl Into<String>) -> Self {
        Error::NoteNotFound { slug: slug.into() }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// True when the error is the caller-contract violation of querying an
    /// engine that has no corpus loaded.
    pub fn is_index_not_built(&self) -> bool {
        matches!(self, Error::IndexNotBuilt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::file_not_found("/path/to/note.md");
        assert!(err.to_string().contains("File not found"));

        let err = Error::not_found("my-note");
        assert_eq!(err.to_string(), "Note not found: my-note");
    }

    #[test]
    fn test_index_not_built_is_distinct() {
        assert!(Error::IndexNotBuilt.is_index_not_built());
        assert!(!Error::not_found("x").is_index_not_built());
    }
}
