//! Filename sanitization for untrusted titles.
//!
//! Turns whatever the downloader named its output into a name that is safe on
//! every common filesystem: reserved characters become `_`, surrounding
//! whitespace is trimmed and the result is bounded to [`MAX_NAME_CHARS`]
//! characters while keeping the extension intact.

/// Characters rejected by the most restrictive common filesystem.
pub const RESERVED_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Maximum length of a sanitized name, in characters.
pub const MAX_NAME_CHARS: usize = 200;

/// Replacement for reserved characters.
const REPLACEMENT: char = '_';

/// Sanitizes a raw name into a portable, length-bounded file name.
///
/// Never fails. Lengths are counted in `char`s so truncation can't split a
/// multi-byte character. The operation is idempotent.
pub fn sanitize(raw_name: &str) -> String {
    let replaced: String = raw_name
        .chars()
        .map(|c| if RESERVED_CHARS.contains(&c) { REPLACEMENT } else { c })
        .collect();

    let trimmed = replaced.trim();
    if trimmed.chars().count() <= MAX_NAME_CHARS {
        return trimmed.to_string();
    }

    truncate_preserving_extension(trimmed)
}

/// Returns the part of a sanitized name before its extension.
///
/// Falls back to the whole name when there is nothing before the last dot.
pub fn title_from_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

fn truncate_preserving_extension(name: &str) -> String {
    let extension = name.rfind('.').map(|idx| &name[idx..]);

    match extension {
        Some(ext) if ext.chars().count() < MAX_NAME_CHARS => {
            let stem_chars = MAX_NAME_CHARS - ext.chars().count();
            let stem: String = name.chars().take(stem_chars).collect();
            format!("{stem}{ext}")
        }
        _ => {
            // No usable extension: cut, then drop whitespace the cut exposed.
            let cut: String = name.chars().take(MAX_NAME_CHARS).collect();
            cut.trim_end().to_string()
        }
    }
}
