//! Error types for the fmd2json library
//!
//! Every fallible operation in the crate returns [`Result`]. Most variants are
//! fatal for a run; [`Fmd2JsonError::Decode`] is the exception and is absorbed
//! by the converter, which treats the document as having no front matter.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum Fmd2JsonError {
    /// I/O errors not tied to a specific input, such as writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading an input file failed
    #[error("reading file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Retrieving the metadata of an input file failed
    #[error("stat file {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a document or the path list from standard input failed
    #[error("reading stdin: {0}")]
    ReadStdin(#[source] std::io::Error),

    /// The front matter could not be decoded into a mapping
    #[error("invalid front matter: {reason}")]
    Decode { reason: String },

    /// The jq expression could not be parsed or compiled
    #[error("failed to compile jq expression `{expr}`: {reason}")]
    QueryCompile { expr: String, reason: String },

    /// The jq expression raised an error while running
    #[error("jq error: {reason}")]
    QueryRuntime { reason: String },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Fmd2JsonError>;

impl Fmd2JsonError {
    /// Create a new file read error
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a new file stat error
    pub fn stat(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Stat {
            path: path.into(),
            source,
        }
    }

    /// Create a new front matter decode error
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// Create a new query compile error
    pub fn query_compile(expr: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::QueryCompile {
            expr: expr.into(),
            reason: reason.into(),
        }
    }

    /// Create a new query runtime error
    pub fn query_runtime(reason: impl Into<String>) -> Self {
        Self::QueryRuntime {
            reason: reason.into(),
        }
    }

    /// Whether this error must abort the run.
    ///
    /// Only decode failures are recoverable; the document is then converted
    /// with its computed fields alone.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Decode { .. })
    }
}
