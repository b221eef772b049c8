//! ID3v2 tagger implementation.

use async_trait::async_trait;
use id3::frame::Comment;
use id3::{ErrorKind, Tag, TagLike, Version};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::TagError;
use super::traits::Tagger;
use super::types::MetadataRecord;

/// Tag version written. Frame sizes and text encodings follow v2.3 rules.
const WRITE_VERSION: Version = Version::Id3v23;

/// Tagger backed by the `id3` crate.
#[derive(Debug, Clone, Default)]
pub struct Id3Tagger;

impl Id3Tagger {
    /// Creates a new ID3 tagger.
    pub fn new() -> Self {
        Self
    }

    fn write_blocking(path: &Path, record: &MetadataRecord) -> Result<(), TagError> {
        let mut tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(e) if matches!(e.kind, ErrorKind::NoTag) => Tag::new(),
            Err(source) => {
                return Err(TagError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        tag.set_title(record.title.as_str());
        tag.set_album(record.album.as_str());
        if let Some(ref artist) = record.artist {
            tag.set_artist(artist.as_str());
        }
        tag.add_frame(Comment {
            lang: record.comment.lang.clone(),
            description: record.comment.description.clone(),
            text: record.comment.text.clone(),
        });

        tag.write_to_path(path, WRITE_VERSION)
            .map_err(|source| TagError::WriteFailed {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Wrote ID3 tag to {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl Tagger for Id3Tagger {
    fn name(&self) -> &str {
        "id3"
    }

    async fn write(&self, path: &Path, record: &MetadataRecord) -> Result<(), TagError> {
        let path: PathBuf = path.to_path_buf();
        let record = record.clone();

        tokio::task::spawn_blocking(move || Self::write_blocking(&path, &record))
            .await
            .map_err(|e| TagError::TaskFailed(e.to_string()))?
    }
}
