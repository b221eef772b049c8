//! Testing utilities and mock implementations for pipeline tests.
//!
//! This module provides mock implementations of the collaborator traits,
//! allowing end-to-end pipeline runs without yt-dlp or real audio files.
//!
//! # Example
//!
//! ```rust,ignore
//! use yt2mp3_core::testing::{fixtures, MockFetcher, MockTagger};
//!
//! let fetcher = MockFetcher::new().with_file("My Song.mp3", fixtures::id3_file(4, 64));
//! let tagger = MockTagger::new();
//!
//! // Use in a Pipeline...
//! ```

mod mock_fetcher;
mod mock_placer;
mod mock_tagger;

pub use mock_fetcher::MockFetcher;
pub use mock_placer::{MockPlacer, RecordedPlacement};
pub use mock_tagger::MockTagger;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::header::{HEADER_LEN, ID3_MAGIC};

    /// Bytes of a file starting with an ID3v2 header of the given major
    /// version, followed by `payload_len` filler bytes.
    pub fn id3_file(major_version: u8, payload_len: usize) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + payload_len);
        bytes.extend_from_slice(ID3_MAGIC);
        bytes.extend_from_slice(&[major_version, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01]);
        bytes.extend((0..payload_len).map(|i| (i % 251) as u8));
        bytes
    }

    /// Bytes of an untagged file of the given length.
    pub fn raw_audio(len: usize) -> Vec<u8> {
        vec![0xFF; len]
    }

}
