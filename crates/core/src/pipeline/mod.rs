//! Pipeline module driving one source URL to a published, tagged file.
//!
//! A run moves strictly forward through
//! `Init → Staged → Fetched → Discovered → Sanitized → Tagged → Normalized → Published`.
//! Any failure aborts the remaining steps; the staging area is removed on
//! every exit path, so a failed run never publishes.
//!
//! # Example
//!
//! ```ignore
//! use yt2mp3_core::fetcher::YtDlpFetcher;
//! use yt2mp3_core::pipeline::{Pipeline, PipelineConfig, PipelineRequest};
//! use yt2mp3_core::placer::{FsPlacer, OutputGuard};
//! use yt2mp3_core::tagger::{Id3Tagger, TaggerConfig};
//!
//! let pipeline = Pipeline::new(
//!     PipelineConfig::default(),
//!     TaggerConfig::default(),
//!     YtDlpFetcher::with_defaults(),
//!     Id3Tagger::new(),
//!     FsPlacer::with_defaults(),
//!     OutputGuard::current_dir()?,
//! );
//!
//! let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel(16);
//! let published = pipeline
//!     .run_with_progress(
//!         PipelineRequest::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ").with_output_dir("music"),
//!         progress_tx,
//!     )
//!     .await?;
//! println!("{}", published.path.display());
//! ```

mod config;
mod controller;
mod error;
mod types;

pub use crate::staging::ArtifactSelection;
pub use config::PipelineConfig;
pub use controller::Pipeline;
pub use error::PipelineError;
pub use types::{PipelineProgress, PipelineRequest, PipelineState, PublishedArtifact};
