/*!
 * Error types for the rpytl application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Inline markup problems found while scanning a fragment.
///
/// These are never fatal: the reinsertion pass resolves every one of them by
/// falling back to the original text. The `Display` output is the reason
/// string surfaced in diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagSyntaxError {
    /// A `{` with no `}` before the end of the fragment
    #[error("unterminated tag")]
    Unterminated,

    /// A closing tag with nothing open
    #[error("extraneous closing tag {raw}")]
    ExtraneousClosing {
        /// Braced text as it appeared in the fragment
        raw: String,
    },

    /// A closing tag that does not match the innermost open tag
    #[error("mismatched tag: expected {expected} found {found}")]
    Mismatched {
        /// Name of the innermost open tag
        expected: String,
        /// Name carried by the closing tag
        found: String,
    },

    /// A tag name outside both the self-closing and the container sets
    #[error("unknown tag {raw}")]
    Unknown {
        /// Braced text as it appeared in the fragment
        raw: String,
    },

    /// Container tags still open at the end of the fragment, innermost first
    #[error("unclosed tag(s): {}", .names.join(" "))]
    Unclosed {
        /// Open tag names, innermost first
        names: Vec<String>,
    },
}

/// Errors from mapping a translation-map file back to its script
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// No discovered script encodes to this flat name
    #[error("No script file corresponds to '{name}'")]
    NotFound {
        /// Flat name looked up
        name: String,
    },

    /// Several scripts encode to the same flat name
    #[error("'{name}' is ambiguous: {} candidates", .candidates.len())]
    Ambiguous {
        /// Flat name looked up
        name: String,
        /// Every script that encodes to it
        candidates: Vec<PathBuf>,
    },

    /// The map file name does not carry the expected suffix
    #[error("'{name}' does not end with '{suffix}'")]
    BadSuffix {
        /// File name inspected
        name: String,
        /// Suffix that was expected
        suffix: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Config error: {0}")]
    Config(String),

    /// A translation map that could not be parsed or written
    #[error("Translation map error: {0}")]
    Map(String),

    /// Error resolving a map file to its script
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Map(error.to_string())
    }
}
