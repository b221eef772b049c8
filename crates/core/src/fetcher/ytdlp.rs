//! yt-dlp based fetcher implementation.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use super::config::FetcherConfig;
use super::error::FetchError;
use super::traits::Fetcher;
use super::types::{FetchReport, FetchRequest, SourceMetadata};

/// Fields yt-dlp prints as a JSON object once the file is in its final place.
const REPORT_TEMPLATE: &str = "after_move:%(.{channel})j";

/// yt-dlp based fetcher implementation.
pub struct YtDlpFetcher {
    config: FetcherConfig,
}

impl YtDlpFetcher {
    /// Creates a new yt-dlp fetcher with the given configuration.
    pub fn new(config: FetcherConfig) -> Self {
        Self { config }
    }

    /// Creates a fetcher with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(FetcherConfig::default())
    }

    /// Builds yt-dlp arguments for a single-item audio extraction.
    fn build_args(&self, request: &FetchRequest) -> Vec<String> {
        let mut args = vec![
            "--no-playlist".to_string(),
            "--no-progress".to_string(),
            "--format".to_string(),
            "bestaudio/best".to_string(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            self.config.audio_format.clone(),
            "--audio-quality".to_string(),
            self.config.audio_quality.clone(),
            "--paths".to_string(),
            request.dest_dir.to_string_lossy().to_string(),
            "--output".to_string(),
            self.config.output_template.clone(),
        ];

        if let Some(ref location) = self.config.ffmpeg_location {
            args.extend([
                "--ffmpeg-location".to_string(),
                location.to_string_lossy().to_string(),
            ]);
        }

        // Report metadata without switching to simulate mode
        args.extend([
            "--print".to_string(),
            REPORT_TEMPLATE.to_string(),
            "--no-simulate".to_string(),
        ]);

        args.extend(self.config.extra_args.iter().cloned());

        // The URL is never parsed as an option
        args.push("--".to_string());
        args.push(request.source_url.clone());

        args
    }

    /// Extracts the metadata object from yt-dlp stdout.
    ///
    /// The last line that parses as a JSON object wins.
    fn parse_report(stdout: &str) -> Option<SourceMetadata> {
        stdout
            .lines()
            .rev()
            .map(str::trim)
            .filter(|line| line.starts_with('{'))
            .find_map(|line| serde_json::from_str::<SourceMetadata>(line).ok())
    }

    fn spawn_error(&self, e: std::io::Error) -> FetchError {
        if e.kind() == std::io::ErrorKind::NotFound {
            FetchError::ToolNotFound {
                path: self.config.ytdlp_path.clone(),
            }
        } else {
            FetchError::Io(e)
        }
    }
}

#[async_trait]
impl Fetcher for YtDlpFetcher {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn fetch(&self, request: FetchRequest) -> Result<FetchReport, FetchError> {
        let start = Instant::now();
        let args = self.build_args(&request);
        debug!(
            "Running {} {}",
            self.config.ytdlp_path.display(),
            args.join(" ")
        );

        let mut command = Command::new(&self.config.ytdlp_path);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.config.timeout_secs {
            Some(timeout_secs) => timeout(Duration::from_secs(timeout_secs), command.output())
                .await
                .map_err(|_| FetchError::Timeout { timeout_secs })?,
            None => command.output().await,
        }
        .map_err(|e| self.spawn_error(e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            let reason = match output.status.code() {
                Some(code) => format!("yt-dlp exited with code {}", code),
                None => "yt-dlp terminated by signal".to_string(),
            };
            return Err(FetchError::failed(reason, stderr));
        }

        if !stderr.trim().is_empty() {
            warn!("yt-dlp reported: {}", stderr.trim());
        }

        let metadata = Self::parse_report(&stdout);
        if metadata.is_none() {
            debug!("yt-dlp printed no metadata report");
        }

        Ok(FetchReport {
            metadata,
            diagnostics: stderr,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), FetchError> {
        let output = Command::new(&self.config.ytdlp_path)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(FetchError::failed(
                "yt-dlp --version failed",
                String::from_utf8_lossy(&output.stderr),
            ));
        }

        debug!(
            "Using yt-dlp {}",
            String::from_utf8_lossy(&output.stdout).trim()
        );
        Ok(())
    }
}
