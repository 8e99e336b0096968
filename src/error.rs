//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.
//! Reading-reference parse failures are not errors in this sense; they are
//! reported as [`crate::reading::ParseErrorKind`] inside a parse result.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Book catalog could not be decoded or failed validation
    #[error("Book catalog error in {source_name}: {message}")]
    Catalog {
        /// File name or label of the catalog that failed.
        source_name: String,
        /// Description of the problem.
        message: String,
    },

    /// Clipboard access failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a catalog error for the named source
    pub fn catalog(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Catalog {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn config_error_includes_hint() {
        let err = Error::config("Unknown language 'xx'", "Use one of: de, en, es, it, fr");
        let text = err.to_string();
        assert!(text.contains("Unknown language"));
        assert!(text.contains("de, en, es, it, fr"));
    }

    #[test]
    fn catalog_error_names_source() {
        let err = Error::catalog("bible-books-en.json", "duplicate book number 3");
        match &err {
            Error::Catalog { source_name, .. } => assert_eq!(source_name, "bible-books-en.json"),
            _ => panic!("Expected Catalog error"),
        }
        assert!(err.to_string().contains("duplicate book number 3"));
    }

    #[test]
    fn io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io(source, Some(std::path::PathBuf::from("/tmp/books.json")));
        assert!(err.to_string().contains("books.json"));
    }
}
