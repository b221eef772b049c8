//! Trait definitions for the tagger module.

use async_trait::async_trait;
use std::path::Path;

use super::error::TagError;
use super::types::MetadataRecord;

/// A tagger that writes a metadata record into an audio file in place.
#[async_trait]
pub trait Tagger: Send + Sync {
    /// Returns the name of this tagger implementation.
    fn name(&self) -> &str;

    /// Writes `record` into the file at `path`, persisting before returning.
    ///
    /// No rollback: on failure the file is left as the tag library left it.
    async fn write(&self, path: &Path, record: &MetadataRecord) -> Result<(), TagError>;
}
