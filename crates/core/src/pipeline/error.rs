//! Error type for pipeline runs.

use thiserror::Error;

use super::types::PipelineState;
use crate::fetcher::FetchError;
use crate::header::HeaderError;
use crate::placer::PlacerError;
use crate::staging::StagingError;
use crate::tagger::TagError;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No source URL was given.
    #[error("Source URL is empty")]
    EmptySource,

    /// Staging area could not be created or its contents were unusable.
    #[error(transparent)]
    Staging(#[from] StagingError),

    /// The downloader failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The artifact name sanitizes to nothing.
    #[error("Artifact name {name:?} is empty after sanitization")]
    EmptyArtifactName { name: String },

    /// Output directory rejected or publishing failed.
    #[error(transparent)]
    Placer(#[from] PlacerError),

    /// Tag write failed.
    #[error(transparent)]
    Tag(#[from] TagError),

    /// Header normalization failed.
    #[error(transparent)]
    Header(#[from] HeaderError),
}

impl PipelineError {
    /// The state the pipeline was trying to reach when this error occurred.
    pub fn failed_at(&self) -> PipelineState {
        match self {
            Self::EmptySource => PipelineState::Init,
            Self::Staging(StagingError::CreateFailed { .. }) => PipelineState::Staged,
            Self::Staging(_) => PipelineState::Discovered,
            Self::Fetch(_) => PipelineState::Fetched,
            Self::EmptyArtifactName { .. } => PipelineState::Sanitized,
            Self::Placer(
                PlacerError::PathEscape { .. }
                | PlacerError::CurrentDir(_)
                | PlacerError::DirectoryCreationFailed { .. },
            ) => PipelineState::Sanitized,
            Self::Placer(_) => PipelineState::Published,
            Self::Tag(_) => PipelineState::Tagged,
            Self::Header(_) => PipelineState::Normalized,
        }
    }
}
