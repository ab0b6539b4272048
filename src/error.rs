//! Error types for the indexer.
//!
//! [`Rejection`] covers the per-item failures that exclude a single path or
//! manifest row and let the build continue. [`IndexError`] covers failures
//! of a whole input source.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single path or manifest record was left out of the index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Segment count matches no known layout, or the path is otherwise
    /// not shaped like an indexable file.
    #[error("malformed path: {0}")]
    MalformedPath(String),

    /// The exam folder is not in the recognized set.
    #[error("unknown exam-type folder `{token}`")]
    UnrecognizedExamType { token: String },

    /// No year could be extracted where one is required.
    #[error("no year in filename `{filename}`")]
    MissingYear { filename: String },

    /// A year folder is present but is not a plausible calendar year.
    #[error("implausible year `{token}`")]
    InvalidYear { token: String },

    /// A manifest row is missing a required field.
    #[error("invalid manifest record: {0}")]
    InvalidManifestRecord(String),

    /// An entry below the content root could not be read while walking
    /// (dangling symlink, permission denied).
    #[error("unreadable entry `{path}`: {reason}")]
    UnreadableEntry { path: String, reason: String },
}

impl Rejection {
    /// Short stable label used for per-reason counts in the build report.
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::MalformedPath(_) => "malformed path",
            Rejection::UnrecognizedExamType { .. } => "unknown exam-type folder",
            Rejection::MissingYear { .. } => "no year in filename",
            Rejection::InvalidYear { .. } => "implausible year",
            Rejection::InvalidManifestRecord(_) => "invalid manifest record",
            Rejection::UnreadableEntry { .. } => "unreadable entry",
        }
    }

    pub(crate) fn unreadable(path: Option<&std::path::Path>, err: &walkdir::Error) -> Self {
        let reason = match err.io_error() {
            Some(io) => io.to_string(),
            None => err.to_string(),
        };
        Rejection::UnreadableEntry {
            path: path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unknown>".to_string()),
            reason,
        }
    }
}

/// Failures of an entire input source.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The manifest exists but is not a list of records. Recovered by the
    /// caller: the manifest contributes no entries.
    #[error("manifest {path} unreadable: {reason}")]
    ManifestUnreadable { path: PathBuf, reason: String },

    /// The content root cannot be enumerated. Fatal.
    #[error("content root unavailable: {path}")]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },
}
