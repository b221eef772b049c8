//! Types for the pipeline module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::header::HeaderOutcome;

/// Pipeline states, in the order a run passes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Init,
    Staged,
    Fetched,
    Discovered,
    Sanitized,
    Tagged,
    Normalized,
    Published,
}

impl PipelineState {
    /// Lowercase name used in logs and progress output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Staged => "staged",
            Self::Fetched => "fetched",
            Self::Discovered => "discovered",
            Self::Sanitized => "sanitized",
            Self::Tagged => "tagged",
            Self::Normalized => "normalized",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress event emitted by [`Pipeline::run_with_progress`](super::Pipeline::run_with_progress).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineProgress {
    /// The run reached a state.
    State(PipelineState),
    /// The run failed while trying to reach `stage`.
    Failed { stage: PipelineState, error: String },
}

/// One pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    /// Source URL.
    pub source_url: String,
    /// Requested output directory, relative to the guard's root when not absolute.
    pub output_dir: Option<PathBuf>,
}

impl PipelineRequest {
    /// Creates a request publishing into the guard's root.
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            output_dir: None,
        }
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedArtifact {
    /// Final path of the published file.
    pub path: PathBuf,
    /// Title written to the tag.
    pub title: String,
    /// Artist written to the tag, if any.
    pub artist: Option<String>,
    /// Published file size in bytes.
    pub size_bytes: u64,
    /// Header normalization result; `None` when normalization is disabled.
    pub header: Option<HeaderOutcome>,
    /// Whether the publish was a same-filesystem rename.
    pub atomic: bool,
    /// Total run duration in milliseconds.
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names() {
        assert_eq!(PipelineState::Init.to_string(), "init");
        assert_eq!(PipelineState::Published.as_str(), "published");
        assert_eq!(
            serde_json::to_string(&PipelineState::Normalized).unwrap(),
            "\"normalized\""
        );
    }

    #[test]
    fn test_request_builder() {
        let request = PipelineRequest::new("https://youtu.be/x").with_output_dir("music");
        assert_eq!(request.source_url, "https://youtu.be/x");
        assert_eq!(request.output_dir, Some(PathBuf::from("music")));
    }
}
