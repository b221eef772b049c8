//! Configuration for the tagger module.

use serde::{Deserialize, Serialize};

/// Labels written by the tagger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggerConfig {
    /// Fixed album label marking where the file came from.
    #[serde(default = "default_album")]
    pub album: String,

    /// ISO 639-2 language code of the provenance comment.
    #[serde(default = "default_comment_lang")]
    pub comment_lang: String,

    /// Description of the provenance comment.
    #[serde(default = "default_comment_description")]
    pub comment_description: String,

    /// Whether to set the artist from the uploading channel when reported.
    #[serde(default = "default_true")]
    pub tag_artist_from_channel: bool,
}

fn default_album() -> String {
    "YouTube".to_string()
}

fn default_comment_lang() -> String {
    "eng".to_string()
}

fn default_comment_description() -> String {
    "YouTube URL".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            album: default_album(),
            comment_lang: default_comment_lang(),
            comment_description: default_comment_description(),
            tag_artist_from_channel: true,
        }
    }
}
