//! Error types for the tagger module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing tags.
#[derive(Debug, Error)]
pub enum TagError {
    /// Existing tag could not be parsed.
    #[error("Failed to read tags from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    /// Tag could not be encoded or persisted.
    #[error("Failed to write tags to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    /// The blocking tag task panicked or was cancelled.
    #[error("Tag task failed: {0}")]
    TaskFailed(String),
}
