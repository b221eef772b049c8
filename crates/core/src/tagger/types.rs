//! Types for the tagger module.

use super::config::TaggerConfig;

/// Comment frame recording where a file came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceComment {
    /// Three letter language code.
    pub lang: String,
    /// Short description identifying the comment.
    pub description: String,
    /// Comment body, the source URL.
    pub text: String,
}

/// The tag set applied to one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    /// Track title.
    pub title: String,
    /// Album label.
    pub album: String,
    /// Artist, when known.
    pub artist: Option<String>,
    /// Provenance comment.
    pub comment: ProvenanceComment,
}

impl MetadataRecord {
    /// Builds the record for `title` fetched from `source_url`, using the configured labels.
    pub fn new(config: &TaggerConfig, title: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            album: config.album.clone(),
            artist: None,
            comment: ProvenanceComment {
                lang: config.comment_lang.clone(),
                description: config.comment_description.clone(),
                text: source_url.into(),
            },
        }
    }

    /// Sets the artist.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_config() {
        let record = MetadataRecord::new(
            &TaggerConfig::default(),
            "My Song",
            "https://www.youtube.com/watch?v=x",
        );
        assert_eq!(record.title, "My Song");
        assert_eq!(record.album, "YouTube");
        assert!(record.artist.is_none());
        assert_eq!(record.comment.lang, "eng");
        assert_eq!(record.comment.description, "YouTube URL");
        assert_eq!(record.comment.text, "https://www.youtube.com/watch?v=x");

        let record = record.with_artist("Channel");
        assert_eq!(record.artist.as_deref(), Some("Channel"));
    }
}
