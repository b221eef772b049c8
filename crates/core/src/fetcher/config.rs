//! Configuration for the fetcher module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the yt-dlp based fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Path to the yt-dlp executable.
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: PathBuf,

    /// Directory or binary handed to yt-dlp as `--ffmpeg-location`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffmpeg_location: Option<PathBuf>,

    /// Target audio codec for extraction.
    #[serde(default = "default_audio_format")]
    pub audio_format: String,

    /// Audio quality directive (0 is best for VBR codecs).
    #[serde(default = "default_audio_quality")]
    pub audio_quality: String,

    /// Output file name template; must contain `%(title)s`.
    #[serde(default = "default_output_template")]
    pub output_template: String,

    /// Timeout for a single fetch in seconds. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Additional arguments passed to yt-dlp before the URL.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_ytdlp_path() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_audio_format() -> String {
    "mp3".to_string()
}

fn default_audio_quality() -> String {
    "0".to_string()
}

fn default_output_template() -> String {
    "%(title)s.%(ext)s".to_string()
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: default_ytdlp_path(),
            ffmpeg_location: None,
            audio_format: default_audio_format(),
            audio_quality: default_audio_quality(),
            output_template: default_output_template(),
            timeout_secs: None,
            extra_args: Vec::new(),
        }
    }
}

impl FetcherConfig {
    /// Creates a config pointing at a specific yt-dlp executable.
    pub fn with_ytdlp_path(ytdlp_path: PathBuf) -> Self {
        Self {
            ytdlp_path,
            ..Default::default()
        }
    }

    /// Sets the ffmpeg location handed to yt-dlp.
    pub fn with_ffmpeg_location(mut self, location: PathBuf) -> Self {
        self.ffmpeg_location = Some(location);
        self
    }

    /// Sets the timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetcherConfig::default();
        assert_eq!(config.ytdlp_path, PathBuf::from("yt-dlp"));
        assert_eq!(config.audio_format, "mp3");
        assert_eq!(config.audio_quality, "0");
        assert!(config.output_template.contains("%(title)s"));
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = FetcherConfig::with_ytdlp_path(PathBuf::from("/usr/local/bin/yt-dlp"))
            .with_ffmpeg_location(PathBuf::from("/opt/ffmpeg/bin"))
            .with_timeout(600);

        assert_eq!(config.ytdlp_path, PathBuf::from("/usr/local/bin/yt-dlp"));
        assert_eq!(config.ffmpeg_location, Some(PathBuf::from("/opt/ffmpeg/bin")));
        assert_eq!(config.timeout_secs, Some(600));
    }

    #[test]
    fn test_config_serialization() {
        let config = FetcherConfig::default().with_timeout(30);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: FetcherConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.timeout_secs, Some(30));
        assert_eq!(parsed.audio_format, config.audio_format);
    }
}
