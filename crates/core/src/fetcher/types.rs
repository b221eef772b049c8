//! Types for the fetcher module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A fetch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Source URL to resolve.
    pub source_url: String,
    /// Directory the produced file must land in.
    pub dest_dir: PathBuf,
}

/// Metadata the downloader reports after post-processing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Uploading channel.
    #[serde(default)]
    pub channel: Option<String>,
}

/// Result of a successful fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Metadata reported by the downloader, when it printed any.
    pub metadata: Option<SourceMetadata>,
    /// Downloader diagnostic output (warnings on success).
    pub diagnostics: String,
    /// Duration in milliseconds.
    pub duration_ms: u64,
}

impl FetchReport {
    /// Uploading channel, if reported.
    pub fn channel(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.channel.as_deref())
            .filter(|c| !c.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_partial_json() {
        let meta: SourceMetadata = serde_json::from_str(r#"{"title": "My Song"}"#).unwrap();
        assert!(meta.channel.is_none());
    }

    #[test]
    fn test_report_channel_ignores_blank() {
        let report = FetchReport {
            metadata: Some(SourceMetadata {
                channel: Some("  ".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(report.channel().is_none());

        let report = FetchReport {
            metadata: Some(SourceMetadata {
                channel: Some("Some Artist".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(report.channel(), Some("Some Artist"));
    }
}
