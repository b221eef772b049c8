//! Configuration for the pipeline controller.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::staging::ArtifactSelection;

/// Pipeline behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Parent directory of the staging area. Defaults to the system temp dir.
    #[serde(default)]
    pub staging_parent: Option<PathBuf>,

    /// Rule applied when the downloader leaves more than one file.
    #[serde(default)]
    pub artifact_selection: ArtifactSelection,

    /// Whether to pin the ID3v2 header to v2.3 after tagging.
    #[serde(default = "default_true")]
    pub normalize_header: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            staging_parent: None,
            artifact_selection: ArtifactSelection::default(),
            normalize_header: true,
        }
    }
}

impl PipelineConfig {
    /// Sets the staging parent directory.
    pub fn with_staging_parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.staging_parent = Some(parent.into());
        self
    }

    /// Sets the artifact selection rule.
    pub fn with_artifact_selection(mut self, selection: ArtifactSelection) -> Self {
        self.artifact_selection = selection;
        self
    }

    /// Enables or disables header normalization.
    pub fn with_header_normalization(mut self, enabled: bool) -> Self {
        self.normalize_header = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert!(config.staging_parent.is_none());
        assert_eq!(config.artifact_selection, ArtifactSelection::Strict);
        assert!(config.normalize_header);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: PipelineConfig = toml::from_str(r#"artifact_selection = "first""#).unwrap();
        assert_eq!(config.artifact_selection, ArtifactSelection::First);
        assert!(config.normalize_header);
    }
}
