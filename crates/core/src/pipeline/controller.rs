//! Pipeline controller implementation.

use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::fetcher::{FetchRequest, Fetcher};
use crate::header;
use crate::placer::{FsPlacer, OutputGuard, Placement, Placer};
use crate::sanitize::{sanitize, title_from_name};
use crate::staging::StagingArea;
use crate::tagger::{MetadataRecord, TaggerConfig, Tagger};

use super::config::PipelineConfig;
use super::error::PipelineError;
use super::types::{PipelineProgress, PipelineRequest, PipelineState, PublishedArtifact};

/// Sends progress events without ever blocking or failing the run.
struct ProgressReporter {
    tx: Option<mpsc::Sender<PipelineProgress>>,
}

impl ProgressReporter {
    fn state(&self, state: PipelineState) {
        debug!("Pipeline state: {}", state);
        if let Some(ref tx) = self.tx {
            let _ = tx.try_send(PipelineProgress::State(state));
        }
    }

    fn failed(&self, err: &PipelineError) {
        if let Some(ref tx) = self.tx {
            let _ = tx.try_send(PipelineProgress::Failed {
                stage: err.failed_at(),
                error: err.to_string(),
            });
        }
    }
}

/// Sequences fetch, discovery, sanitization, tagging, header normalization
/// and publishing for one source URL.
///
/// Collaborators are injected, so each run is independent and tests can
/// substitute any of them.
pub struct Pipeline<F: Fetcher, T: Tagger, P: Placer = FsPlacer> {
    config: PipelineConfig,
    tagger_config: TaggerConfig,
    fetcher: F,
    tagger: T,
    placer: P,
    guard: OutputGuard,
}

impl<F: Fetcher, T: Tagger, P: Placer> Pipeline<F, T, P> {
    /// Creates a new pipeline.
    pub fn new(
        config: PipelineConfig,
        tagger_config: TaggerConfig,
        fetcher: F,
        tagger: T,
        placer: P,
        guard: OutputGuard,
    ) -> Self {
        Self {
            config,
            tagger_config,
            fetcher,
            tagger,
            placer,
            guard,
        }
    }

    /// The output guard in use.
    pub fn guard(&self) -> &OutputGuard {
        &self.guard
    }

    /// Runs the pipeline for one request.
    pub async fn run(&self, request: PipelineRequest) -> Result<PublishedArtifact, PipelineError> {
        self.execute(request, ProgressReporter { tx: None }).await
    }

    /// Runs the pipeline, reporting each state transition on `progress_tx`.
    ///
    /// A full or closed channel drops events; the run itself is unaffected.
    pub async fn run_with_progress(
        &self,
        request: PipelineRequest,
        progress_tx: mpsc::Sender<PipelineProgress>,
    ) -> Result<PublishedArtifact, PipelineError> {
        self.execute(
            request,
            ProgressReporter {
                tx: Some(progress_tx),
            },
        )
        .await
    }

    async fn execute(
        &self,
        request: PipelineRequest,
        progress: ProgressReporter,
    ) -> Result<PublishedArtifact, PipelineError> {
        let start = Instant::now();
        progress.state(PipelineState::Init);

        let result = self.stage_and_process(&request, &progress, start).await;
        if let Err(ref e) = result {
            error!(
                "Pipeline failed at {} for {}: {}",
                e.failed_at(),
                request.source_url,
                e
            );
            progress.failed(e);
        }
        result
    }

    async fn stage_and_process(
        &self,
        request: &PipelineRequest,
        progress: &ProgressReporter,
        start: Instant,
    ) -> Result<PublishedArtifact, PipelineError> {
        if request.source_url.trim().is_empty() {
            return Err(PipelineError::EmptySource);
        }

        // Reject escaping output directories before anything is downloaded
        self.guard.check(request.output_dir.as_deref())?;

        let staging = StagingArea::open(self.config.staging_parent.as_deref())?;
        progress.state(PipelineState::Staged);

        let result = self.process(&staging, request, progress, start).await;
        staging.close();
        result
    }

    async fn process(
        &self,
        staging: &StagingArea,
        request: &PipelineRequest,
        progress: &ProgressReporter,
        start: Instant,
    ) -> Result<PublishedArtifact, PipelineError> {
        info!(
            "Fetching {} with {} into {}",
            request.source_url,
            self.fetcher.name(),
            staging.path().display()
        );
        let report = self
            .fetcher
            .fetch(FetchRequest {
                source_url: request.source_url.clone(),
                dest_dir: staging.path().to_path_buf(),
            })
            .await?;
        if !report.diagnostics.trim().is_empty() {
            debug!("Downloader output: {}", report.diagnostics.trim());
        }
        progress.state(PipelineState::Fetched);

        let artifact = staging.discover(self.config.artifact_selection).await?;
        info!(
            "Discovered {} ({} bytes)",
            artifact.display_name, artifact.size_bytes
        );
        progress.state(PipelineState::Discovered);

        let file_name = sanitize(&artifact.display_name);
        if file_name.is_empty() {
            return Err(PipelineError::EmptyArtifactName {
                name: artifact.display_name,
            });
        }
        let title = title_from_name(&file_name).to_string();
        let dest_dir = self.guard.resolve(request.output_dir.as_deref()).await?;
        let destination = dest_dir.join(&file_name);
        progress.state(PipelineState::Sanitized);

        let mut record = MetadataRecord::new(&self.tagger_config, title, &request.source_url);
        if self.tagger_config.tag_artist_from_channel {
            if let Some(channel) = report.channel() {
                record = record.with_artist(channel);
            }
        }
        self.tagger.write(&artifact.path, &record).await?;
        debug!("Tagged {} with {}", artifact.path.display(), self.tagger.name());
        progress.state(PipelineState::Tagged);

        let header = if self.config.normalize_header {
            Some(header::normalize(&artifact.path).await?)
        } else {
            None
        };
        progress.state(PipelineState::Normalized);

        let placed = self
            .placer
            .publish(Placement {
                source: artifact.path,
                destination,
            })
            .await?;
        progress.state(PipelineState::Published);

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Published {} ({} bytes) in {} ms",
            placed.destination.display(),
            placed.size_bytes,
            duration_ms
        );

        Ok(PublishedArtifact {
            path: placed.destination,
            title: record.title,
            artist: record.artist,
            size_bytes: placed.size_bytes,
            header,
            atomic: placed.atomic,
            duration_ms,
        })
    }
}
