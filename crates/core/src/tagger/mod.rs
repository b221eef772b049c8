//! Tagger module for stamping descriptive metadata into finished audio files.
//!
//! The `Tagger` trait hides the tag library. `Id3Tagger` opens the file,
//! keeps unrelated frames, sets title and album (and artist when known) and
//! adds a provenance comment holding the source URL.

mod config;
mod error;
mod id3_tagger;
mod traits;
mod types;

pub use config::TaggerConfig;
pub use error::TagError;
pub use id3_tagger::Id3Tagger;
pub use traits::Tagger;
pub use types::{MetadataRecord, ProvenanceComment};
