//! Error types for the fetcher module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching a source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Downloader executable not found.
    #[error("Downloader not found at path: {path}")]
    ToolNotFound { path: PathBuf },

    /// The downloader ran and reported failure.
    ///
    /// `diagnostics` is the downloader's error output, verbatim.
    #[error("Download failed ({reason}): {diagnostics}")]
    Failed { reason: String, diagnostics: String },

    /// Fetch timed out.
    #[error("Download timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error while running the downloader.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Creates a new failed error carrying the downloader output.
    pub fn failed(reason: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
            diagnostics: diagnostics.into(),
        }
    }

    /// The downloader's diagnostic output, if any was captured.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Self::Failed { diagnostics, .. } => Some(diagnostics),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message_keeps_output_verbatim() {
        let stderr = "ERROR: [youtube] abc: Video unavailable\n";
        let err = FetchError::failed("exit code 1", stderr);
        assert!(err.to_string().contains("ERROR: [youtube] abc: Video unavailable"));
        assert_eq!(err.diagnostics(), Some(stderr));
    }

    #[test]
    fn test_diagnostics_absent_for_other_errors() {
        let err = FetchError::Timeout { timeout_secs: 5 };
        assert!(err.diagnostics().is_none());
    }
}
