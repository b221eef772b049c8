//! Mock fetcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, FetchReport, FetchRequest, Fetcher, SourceMetadata};

/// An entry the mock writes into the destination directory.
#[derive(Debug, Clone)]
enum Produced {
    File { name: String, bytes: Vec<u8> },
    Dir { name: String },
}

/// Mock implementation of the Fetcher trait.
///
/// Provides controllable behavior for testing:
/// - Writes configured files into the destination directory
/// - Records every request for assertions
/// - Simulates downloader failures
///
/// # Example
///
/// ```rust,ignore
/// use yt2mp3_core::testing::MockFetcher;
///
/// let fetcher = MockFetcher::new().with_file("My Song.mp3", b"ID3\x04...".to_vec());
///
/// let report = fetcher.fetch(request).await?;
///
/// let requests = fetcher.recorded_requests().await;
/// assert_eq!(requests.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    /// Entries written on each successful fetch.
    produced: Vec<Produced>,
    /// Recorded requests.
    requests: Arc<RwLock<Vec<FetchRequest>>>,
    /// If set, the next fetch will fail with this error.
    next_error: Arc<RwLock<Option<FetchError>>>,
    /// Channel reported in the fetch metadata.
    channel: Arc<RwLock<Option<String>>>,
    /// Diagnostic output returned on success.
    diagnostics: Arc<RwLock<String>>,
}

impl MockFetcher {
    /// Create a new mock fetcher that produces nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file written on fetch.
    pub fn with_file(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.produced.push(Produced::File {
            name: name.into(),
            bytes,
        });
        self
    }

    /// Add a subdirectory created on fetch.
    pub fn with_dir(mut self, name: impl Into<String>) -> Self {
        self.produced.push(Produced::Dir { name: name.into() });
        self
    }

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<FetchRequest> {
        self.requests.read().await.clone()
    }

    /// Get the number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: FetchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the channel reported with the fetch.
    pub async fn set_channel(&self, channel: impl Into<String>) {
        *self.channel.write().await = Some(channel.into());
    }

    /// Set the diagnostic output returned on success.
    pub async fn set_diagnostics(&self, diagnostics: impl Into<String>) {
        *self.diagnostics.write().await = diagnostics.into();
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, request: FetchRequest) -> Result<FetchReport, FetchError> {
        self.requests.write().await.push(request.clone());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        for entry in &self.produced {
            match entry {
                Produced::File { name, bytes } => {
                    let path = request.dest_dir.join(name);
                    tokio::fs::write(&path, bytes).await?;
                }
                Produced::Dir { name } => {
                    tokio::fs::create_dir_all(request.dest_dir.join(name)).await?;
                }
            }
        }

        Ok(FetchReport {
            metadata: Some(SourceMetadata {
                channel: self.channel.read().await.clone(),
            }),
            diagnostics: self.diagnostics.read().await.clone(),
            duration_ms: 0,
        })
    }

    async fn validate(&self) -> Result<(), FetchError> {
        Ok(())
    }
}
