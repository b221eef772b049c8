//! Mock placer for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::placer::{PlacedFile, Placement, Placer, PlacerError};

/// A recorded publish for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedPlacement {
    /// The placement that was submitted.
    pub placement: Placement,
    /// Whether the publish succeeded.
    pub success: bool,
}

/// Mock implementation of the Placer trait.
///
/// Publishes with a plain rename so tests can inspect the result, and can
/// be told to fail the next publish.
///
/// # Example
///
/// ```rust,ignore
/// use yt2mp3_core::testing::MockPlacer;
///
/// let placer = MockPlacer::new();
/// placer.set_next_error(PlacerError::DestinationExists { path }).await;
///
/// let placements = placer.recorded_placements().await;
/// assert!(!placements[0].success);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockPlacer {
    /// Recorded placements.
    placements: Arc<RwLock<Vec<RecordedPlacement>>>,
    /// If set, the next publish will fail with this error.
    next_error: Arc<RwLock<Option<PlacerError>>>,
}

impl MockPlacer {
    /// Create a new mock placer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded placements.
    pub async fn recorded_placements(&self) -> Vec<RecordedPlacement> {
        self.placements.read().await.clone()
    }

    /// Get the number of publishes attempted.
    pub async fn placement_count(&self) -> usize {
        self.placements.read().await.len()
    }

    /// Configure the next publish to fail with the given error.
    pub async fn set_next_error(&self, error: PlacerError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl Placer for MockPlacer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn publish(&self, placement: Placement) -> Result<PlacedFile, PlacerError> {
        if let Some(err) = self.next_error.write().await.take() {
            self.placements.write().await.push(RecordedPlacement {
                placement,
                success: false,
            });
            return Err(err);
        }

        tokio::fs::rename(&placement.source, &placement.destination).await?;
        let size_bytes = tokio::fs::metadata(&placement.destination).await?.len();

        self.placements.write().await.push(RecordedPlacement {
            placement: placement.clone(),
            success: true,
        });

        Ok(PlacedFile {
            destination: placement.destination,
            size_bytes,
            atomic: true,
        })
    }
}
