//! File system placer implementation.

use async_trait::async_trait;
use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, warn};

use super::config::PlacerConfig;
use super::error::PlacerError;
use super::traits::Placer;
use super::types::{PlacedFile, Placement};

/// File system based placer implementation.
pub struct FsPlacer {
    config: PlacerConfig,
}

impl FsPlacer {
    /// Creates a new file system placer with the given configuration.
    pub fn new(config: PlacerConfig) -> Self {
        Self { config }
    }

    /// Creates a placer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PlacerConfig::default())
    }

    /// Attempts to move a file atomically (rename).
    async fn try_atomic_move(source: &Path, destination: &Path) -> Result<bool, std::io::Error> {
        match fs::rename(source, destination).await {
            Ok(()) => Ok(true),
            Err(e) => {
                // Cross-filesystem moves fail with EXDEV (18 on Linux)
                if e.kind() == std::io::ErrorKind::CrossesDevices || e.raw_os_error() == Some(18) {
                    Ok(false)
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Copies a file through a buffer of the configured size.
    async fn copy_file(&self, source: &Path, destination: &Path) -> Result<u64, PlacerError> {
        let copy_failed =
            |e| PlacerError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e);

        let source_file = File::open(source).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlacerError::SourceNotFound {
                    path: source.to_path_buf(),
                }
            } else {
                PlacerError::Io(e)
            }
        })?;

        let dest_file = File::create(destination).await.map_err(copy_failed)?;

        let mut reader = BufReader::with_capacity(self.config.buffer_size, source_file);
        let mut writer = BufWriter::with_capacity(self.config.buffer_size, dest_file);

        let mut total_bytes = 0u64;
        let mut buffer = vec![0u8; self.config.buffer_size];

        loop {
            let bytes_read = reader.read(&mut buffer).await.map_err(copy_failed)?;
            if bytes_read == 0 {
                break;
            }
            writer
                .write_all(&buffer[..bytes_read])
                .await
                .map_err(copy_failed)?;
            total_bytes += bytes_read as u64;
        }

        writer.flush().await.map_err(copy_failed)?;
        writer.get_ref().sync_all().await.map_err(copy_failed)?;

        Ok(total_bytes)
    }

    /// Copies then removes the source. A partial destination is removed on failure.
    async fn copy_and_remove(&self, source: &Path, destination: &Path) -> Result<u64, PlacerError> {
        let size = match self.copy_file(source, destination).await {
            Ok(size) => size,
            Err(e) => {
                if !matches!(e, PlacerError::SourceNotFound { .. }) {
                    if let Err(cleanup) = fs::remove_file(destination).await {
                        if cleanup.kind() != std::io::ErrorKind::NotFound {
                            warn!(
                                "Failed to remove partial copy {}: {}",
                                destination.display(),
                                cleanup
                            );
                        }
                    }
                }
                return Err(e);
            }
        };

        fs::remove_file(source).await.map_err(|e| {
            PlacerError::move_failed(source.to_path_buf(), destination.to_path_buf(), e)
        })?;

        Ok(size)
    }
}

#[async_trait]
impl Placer for FsPlacer {
    fn name(&self) -> &str {
        "fs"
    }

    async fn publish(&self, placement: Placement) -> Result<PlacedFile, PlacerError> {
        let Placement {
            source,
            destination,
        } = placement;

        if !fs::try_exists(&source).await? {
            return Err(PlacerError::SourceNotFound { path: source });
        }

        if !self.config.overwrite && fs::try_exists(&destination).await? {
            return Err(PlacerError::DestinationExists { path: destination });
        }

        let atomic = self.config.prefer_atomic_moves
            && Self::try_atomic_move(&source, &destination)
                .await
                .map_err(|e| PlacerError::move_failed(source.clone(), destination.clone(), e))?;

        let size_bytes = if atomic {
            fs::metadata(&destination).await?.len()
        } else {
            debug!(
                "Rename unavailable, copying {} to {}",
                source.display(),
                destination.display()
            );
            self.copy_and_remove(&source, &destination).await?
        };

        debug!(
            "Published {} ({} bytes, atomic: {})",
            destination.display(),
            size_bytes,
            atomic
        );

        Ok(PlacedFile {
            destination,
            size_bytes,
            atomic,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn placement(temp: &TempDir, source: &str, destination: &str) -> Placement {
        Placement {
            source: temp.path().join(source),
            destination: temp.path().join(destination),
        }
    }

    #[tokio::test]
    async fn test_publish_rename() {
        let temp = TempDir::new().unwrap();
        let job = placement(&temp, "staged.mp3", "My Song.mp3");
        fs::write(&job.source, "audio").await.unwrap();

        let placed = FsPlacer::with_defaults().publish(job.clone()).await.unwrap();

        assert!(placed.atomic);
        assert_eq!(placed.size_bytes, 5);
        assert_eq!(placed.destination, job.destination);
        assert!(!job.source.exists());
        assert_eq!(fs::read_to_string(&job.destination).await.unwrap(), "audio");
    }

    #[tokio::test]
    async fn test_publish_copy_removes_source() {
        let temp = TempDir::new().unwrap();
        let job = placement(&temp, "staged.mp3", "out.mp3");
        fs::write(&job.source, "copied content").await.unwrap();

        let placer = FsPlacer::new(
            PlacerConfig::default()
                .with_atomic_moves(false)
                .with_buffer_size(4),
        );
        let placed = placer.publish(job.clone()).await.unwrap();

        assert!(!placed.atomic);
        assert_eq!(placed.size_bytes, 14);
        assert!(!job.source.exists());
        assert_eq!(
            fs::read_to_string(&job.destination).await.unwrap(),
            "copied content"
        );
    }

    #[tokio::test]
    async fn test_source_not_found() {
        let temp = TempDir::new().unwrap();
        let job = placement(&temp, "missing.mp3", "out.mp3");

        let result = FsPlacer::with_defaults().publish(job.clone()).await;
        assert!(matches!(result, Err(PlacerError::SourceNotFound { .. })));
        assert!(!job.destination.exists());
    }

    #[tokio::test]
    async fn test_destination_exists_error() {
        let temp = TempDir::new().unwrap();
        let job = placement(&temp, "staged.mp3", "out.mp3");
        fs::write(&job.source, "new").await.unwrap();
        fs::write(&job.destination, "existing").await.unwrap();

        let placer = FsPlacer::new(PlacerConfig::default().with_overwrite(false));
        let result = placer.publish(job.clone()).await;

        assert!(matches!(result, Err(PlacerError::DestinationExists { .. })));
        assert!(job.source.exists());
        assert_eq!(
            fs::read_to_string(&job.destination).await.unwrap(),
            "existing"
        );
    }

    #[tokio::test]
    async fn test_publish_with_overwrite() {
        let temp = TempDir::new().unwrap();

        for atomic in [true, false] {
            let job = placement(&temp, "staged.mp3", "out.mp3");
            fs::write(&job.source, "new content").await.unwrap();
            fs::write(&job.destination, "old content, longer").await.unwrap();

            let placer = FsPlacer::new(PlacerConfig::default().with_atomic_moves(atomic));
            placer.publish(job.clone()).await.unwrap();

            assert_eq!(
                fs::read_to_string(&job.destination).await.unwrap(),
                "new content"
            );
        }
    }

    #[tokio::test]
    async fn test_missing_destination_dir_fails() {
        let temp = TempDir::new().unwrap();
        let job = placement(&temp, "staged.mp3", "no/such/dir/out.mp3");
        fs::write(&job.source, "audio").await.unwrap();

        for atomic in [true, false] {
            let placer = FsPlacer::new(PlacerConfig::default().with_atomic_moves(atomic));
            assert!(placer.publish(job.clone()).await.is_err());
            assert!(job.source.exists());
        }
    }
}
