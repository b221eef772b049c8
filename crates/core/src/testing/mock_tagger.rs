//! Mock tagger for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::tagger::{MetadataRecord, TagError, Tagger};

/// Mock implementation of the Tagger trait.
///
/// Records each write without touching the file, so header bytes written
/// by a [`MockFetcher`](super::MockFetcher) reach the normalizer unchanged.
#[derive(Debug, Clone, Default)]
pub struct MockTagger {
    /// Recorded writes.
    writes: Arc<RwLock<Vec<(PathBuf, MetadataRecord)>>>,
    /// If set, the next write will fail with this error.
    next_error: Arc<RwLock<Option<TagError>>>,
}

impl MockTagger {
    /// Create a new mock tagger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded writes.
    pub async fn recorded_writes(&self) -> Vec<(PathBuf, MetadataRecord)> {
        self.writes.read().await.clone()
    }

    /// Configure the next write to fail with the given error.
    pub async fn set_next_error(&self, error: TagError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl Tagger for MockTagger {
    fn name(&self) -> &str {
        "mock"
    }

    async fn write(&self, path: &Path, record: &MetadataRecord) -> Result<(), TagError> {
        self.writes
            .write()
            .await
            .push((path.to_path_buf(), record.clone()));

        match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::TaggerConfig;

    #[tokio::test]
    async fn test_records_writes() {
        let tagger = MockTagger::new();
        let record = MetadataRecord::new(&TaggerConfig::default(), "Song", "https://youtu.be/x");

        tagger.write(Path::new("/stage/Song.mp3"), &record).await.unwrap();
        tagger
            .set_next_error(TagError::TaskFailed("simulated".to_string()))
            .await;
        assert!(tagger.write(Path::new("/stage/Song.mp3"), &record).await.is_err());

        let writes = tagger.recorded_writes().await;
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].0, PathBuf::from("/stage/Song.mp3"));
        assert_eq!(writes[0].1.title, "Song");
    }
}
