//! Trait definitions for the fetcher module.

use async_trait::async_trait;

use super::error::FetchError;
use super::types::{FetchReport, FetchRequest};

/// A fetcher that turns a source URL into one audio file on disk.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the name of this fetcher implementation.
    fn name(&self) -> &str;

    /// Fetches the source and writes exactly one audio file into `request.dest_dir`.
    async fn fetch(&self, request: FetchRequest) -> Result<FetchReport, FetchError>;

    /// Validates that the fetcher is properly configured and ready.
    async fn validate(&self) -> Result<(), FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct StaticFetcher;

    #[async_trait]
    impl Fetcher for StaticFetcher {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch(&self, request: FetchRequest) -> Result<FetchReport, FetchError> {
            tokio::fs::write(request.dest_dir.join("track.mp3"), b"audio").await?;
            Ok(FetchReport::default())
        }

        async fn validate(&self) -> Result<(), FetchError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_fetcher_as_trait_object() {
        let temp = tempfile::TempDir::new().unwrap();
        let fetcher: Box<dyn Fetcher> = Box::new(StaticFetcher);

        fetcher.validate().await.unwrap();
        fetcher
            .fetch(FetchRequest {
                source_url: "https://example.com/v".to_string(),
                dest_dir: PathBuf::from(temp.path()),
            })
            .await
            .unwrap();

        assert_eq!(fetcher.name(), "static");
        assert!(temp.path().join("track.mp3").exists());
    }
}
