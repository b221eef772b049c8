//! Types for the placer module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single publish request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Staged file.
    pub source: PathBuf,
    /// Final path.
    pub destination: PathBuf,
}

/// Information about a published file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedFile {
    /// Final destination path.
    pub destination: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Whether the move was a same-filesystem rename.
    pub atomic: bool,
}
