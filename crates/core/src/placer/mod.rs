//! Placer module for publishing finished files to their final destination.
//!
//! This module provides the `OutputGuard`, which confines caller-chosen
//! output directories to an approved root, and the `Placer` trait with a
//! file system implementation that moves the staged artifact into place.
//!
//! # Features
//!
//! - Output directory containment checks after lexical normalization
//! - Atomic moves when source and destination are on the same filesystem
//! - Automatic fallback to copy + remove across filesystems
//! - Optional refusal to overwrite an existing destination
//!
//! # Example
//!
//! ```ignore
//! use yt2mp3_core::placer::{FsPlacer, OutputGuard, Placer, Placement};
//!
//! let guard = OutputGuard::current_dir()?;
//! let dest_dir = guard.resolve(Some(Path::new("music"))).await?;
//!
//! let placer = FsPlacer::with_defaults();
//! let placed = placer
//!     .publish(Placement {
//!         source: PathBuf::from("/tmp/yt2mp3-abc/My Song.mp3"),
//!         destination: dest_dir.join("My Song.mp3"),
//!     })
//!     .await?;
//! println!("Placed {} ({} bytes)", placed.destination.display(), placed.size_bytes);
//! ```

mod config;
mod error;
mod fs_placer;
mod guard;
mod traits;
mod types;

pub use config::PlacerConfig;
pub use error::PlacerError;
pub use fs_placer::FsPlacer;
pub use guard::{normalize_lexically, OutputGuard};
pub use traits::Placer;
pub use types::{PlacedFile, Placement};
