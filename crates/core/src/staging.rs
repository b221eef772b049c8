//! Process-private staging workspace.
//!
//! The downloader writes into a [`StagingArea`]; the pipeline then discovers the
//! single artifact it produced. The directory tree is removed on [`StagingArea::close`]
//! or, failing that, when the value is dropped, so every exit path cleans up.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, warn};

/// Prefix of the staging directory name.
const STAGING_PREFIX: &str = "yt2mp3-";

/// Suffixes of files the downloader leaves behind while still working.
const IN_PROGRESS_SUFFIXES: [&str; 2] = [".part", ".ytdl"];

/// Errors raised by the staging area.
#[derive(Debug, Error)]
pub enum StagingError {
    /// The temporary directory could not be created.
    #[error("Failed to create staging directory: {source}")]
    CreateFailed {
        #[source]
        source: std::io::Error,
    },

    /// The staging directory could not be enumerated.
    #[error("Failed to read staging directory {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The downloader finished without leaving a file behind.
    #[error("No artifact produced in {path}")]
    NoArtifactProduced { path: PathBuf },

    /// More than one candidate file and strict selection is in effect.
    #[error("Expected one artifact, found {}: {}", candidates.len(), candidates.join(", "))]
    MultipleArtifacts { candidates: Vec<String> },
}

/// How to pick the artifact when the downloader leaves more than one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactSelection {
    /// Fail with [`StagingError::MultipleArtifacts`].
    #[default]
    Strict,
    /// Take the first candidate by file name.
    First,
}

/// A file produced inside the staging area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedArtifact {
    /// Absolute path inside the staging directory.
    pub path: PathBuf,
    /// File name as written by the downloader.
    pub display_name: String,
    /// Size in bytes at discovery time.
    pub size_bytes: u64,
}

/// Scoped temporary workspace owning every intermediate file of one run.
#[derive(Debug)]
pub struct StagingArea {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl StagingArea {
    /// Creates a uniquely named staging directory under the system temp dir,
    /// or under `parent` when given.
    pub fn open(parent: Option<&Path>) -> Result<Self, StagingError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX);

        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        }
        .map_err(|source| StagingError::CreateFailed { source })?;

        let path = dir.path().to_path_buf();
        debug!("Opened staging area at {}", path.display());

        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    /// Absolute path of the staging directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Finds the artifact the downloader produced.
    ///
    /// Only regular files count; directories and in-progress downloads are skipped.
    pub async fn discover(
        &self,
        selection: ArtifactSelection,
    ) -> Result<StagedArtifact, StagingError> {
        let read_failed = |source| StagingError::ReadFailed {
            path: self.path.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.path).await.map_err(read_failed)?;
        let mut candidates = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(read_failed)? {
            let name = entry.file_name().to_string_lossy().to_string();
            let metadata = entry.metadata().await.map_err(read_failed)?;

            if !metadata.is_file() {
                debug!("Skipping non-file staging entry {}", name);
                continue;
            }
            if IN_PROGRESS_SUFFIXES.iter().any(|s| name.ends_with(s)) {
                debug!("Skipping in-progress staging entry {}", name);
                continue;
            }

            candidates.push(StagedArtifact {
                path: entry.path(),
                display_name: name,
                size_bytes: metadata.len(),
            });
        }

        candidates.sort_by(|a, b| a.display_name.cmp(&b.display_name));

        match (candidates.len(), selection) {
            (0, _) => Err(StagingError::NoArtifactProduced {
                path: self.path.clone(),
            }),
            (1, _) | (_, ArtifactSelection::First) => Ok(candidates.swap_remove(0)),
            (_, ArtifactSelection::Strict) => Err(StagingError::MultipleArtifacts {
                candidates: candidates.into_iter().map(|c| c.display_name).collect(),
            }),
        }
    }

    /// Removes the staging directory tree.
    ///
    /// Best-effort: removal errors are logged, never returned.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => debug!("Removed staging area {}", self.path.display()),
                Err(e) => warn!(
                    "Failed to remove staging area {}: {}",
                    self.path.display(),
                    e
                ),
            }
        }
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        self.release();
    }
}
