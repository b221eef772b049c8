//! Trait definitions for the placer module.

use async_trait::async_trait;

use super::error::PlacerError;
use super::types::{PlacedFile, Placement};

/// A placer that moves a staged file to its final destination.
#[async_trait]
pub trait Placer: Send + Sync {
    /// Returns the name of this placer implementation.
    fn name(&self) -> &str;

    /// Moves `placement.source` to `placement.destination`.
    ///
    /// After success the source path no longer exists.
    async fn publish(&self, placement: Placement) -> Result<PlacedFile, PlacerError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct RecordingPlacer;

    #[async_trait]
    impl Placer for RecordingPlacer {
        fn name(&self) -> &str {
            "recording"
        }

        async fn publish(&self, placement: Placement) -> Result<PlacedFile, PlacerError> {
            Ok(PlacedFile {
                destination: placement.destination,
                size_bytes: 0,
                atomic: true,
            })
        }
    }

    #[tokio::test]
    async fn test_placer_as_trait_object() {
        let placer: Box<dyn Placer> = Box::new(RecordingPlacer);
        let placed = placer
            .publish(Placement {
                source: PathBuf::from("/stage/a.mp3"),
                destination: PathBuf::from("/out/a.mp3"),
            })
            .await
            .unwrap();
        assert_eq!(placed.destination, PathBuf::from("/out/a.mp3"));
        assert_eq!(placer.name(), "recording");
    }
}
