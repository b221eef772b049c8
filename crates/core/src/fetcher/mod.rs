//! Fetcher module for retrieving a source URL's audio track.
//!
//! This module provides the `Fetcher` trait and a yt-dlp backed implementation.
//! A fetcher resolves a source URL, extracts the best available audio stream,
//! transcodes it to the configured codec and leaves exactly one file in the
//! destination directory.
//!
//! # Example
//!
//! ```ignore
//! use yt2mp3_core::fetcher::{FetchRequest, Fetcher, YtDlpFetcher};
//!
//! let fetcher = YtDlpFetcher::with_defaults();
//!
//! // Validate yt-dlp is available
//! fetcher.validate().await?;
//!
//! let report = fetcher
//!     .fetch(FetchRequest {
//!         source_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
//!         dest_dir: staging.path().to_path_buf(),
//!     })
//!     .await?;
//! println!("Fetched in {} ms", report.duration_ms);
//! ```

mod config;
mod error;
mod traits;
mod types;
mod ytdlp;

pub use config::FetcherConfig;
pub use error::FetchError;
pub use traits::Fetcher;
pub use types::{FetchReport, FetchRequest, SourceMetadata};
pub use ytdlp::YtDlpFetcher;
