//! ID3v2 header version pinning.
//!
//! Some players only parse ID3v2.3 reliably. A tag that still reports v2.4 after
//! tagging has its major version byte downgraded from 4 to 3 in place. Only the
//! 10-byte header is ever rewritten and the file length never changes.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::debug;

/// Size of the ID3v2 header.
pub const HEADER_LEN: usize = 10;

/// Tag magic at offset 0.
pub const ID3_MAGIC: &[u8; 3] = b"ID3";

/// Offset of the major version byte.
const VERSION_OFFSET: usize = 3;

/// Major version rewritten by the normalizer.
const INCOMPATIBLE_VERSION: u8 = 4;

/// Major version written in its place.
const PINNED_VERSION: u8 = 3;

/// Errors raised while normalizing a header.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// The file is shorter than a full header.
    #[error("Truncated header in {path}: {len} of {HEADER_LEN} bytes")]
    TruncatedHeader { path: PathBuf, len: usize },

    /// Reading or writing the file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What the normalizer did to a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderOutcome {
    /// Version 4 was downgraded to 3.
    Patched,
    /// Tag present with a version that needs no change.
    Unchanged { major_version: u8 },
    /// No ID3 magic; nothing to do.
    NoTag,
}

/// Applies the version pin to an in-memory header.
///
/// `header` must hold at least [`HEADER_LEN`] bytes; only byte 3 may change.
pub fn normalize_header(header: &mut [u8]) -> Option<HeaderOutcome> {
    if header.len() < HEADER_LEN {
        return None;
    }
    if &header[..ID3_MAGIC.len()] != ID3_MAGIC {
        return Some(HeaderOutcome::NoTag);
    }

    match header[VERSION_OFFSET] {
        INCOMPATIBLE_VERSION => {
            header[VERSION_OFFSET] = PINNED_VERSION;
            Some(HeaderOutcome::Patched)
        }
        major_version => Some(HeaderOutcome::Unchanged { major_version }),
    }
}

/// Normalizes the ID3v2 header of the file at `path` in place.
///
/// The file is opened for reading and writing up front, so a read-only file
/// fails even when no patch would be needed.
pub async fn normalize(path: &Path) -> Result<HeaderOutcome, HeaderError> {
    let io_err = |source| HeaderError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .await
        .map_err(io_err)?;

    let mut header = [0u8; HEADER_LEN];
    let mut filled = 0;
    while filled < HEADER_LEN {
        let n = file.read(&mut header[filled..]).await.map_err(io_err)?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    let outcome =
        normalize_header(&mut header[..filled]).ok_or_else(|| HeaderError::TruncatedHeader {
            path: path.to_path_buf(),
            len: filled,
        })?;

    if outcome == HeaderOutcome::Patched {
        file.seek(SeekFrom::Start(0)).await.map_err(io_err)?;
        file.write_all(&header).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;
        debug!("Pinned ID3 header of {} to v2.3", path.display());
    }

    Ok(outcome)
}
