//! Normalization of user-supplied filter values.
//!
//! Filter values arrive from the command line or a config file and are
//! compared against names taken from the filesystem. Configured values are
//! trimmed; filesystem names are only lower-cased, except extensions, which
//! go through [`normalize_extension`] on both sides.
//!
//! # Examples
//!
//! ```
//! use fsearch_core::{fold_case, normalize_extension};
//!
//! assert_eq!(fold_case("  README.MD "), Some("readme.md".to_owned()));
//! assert_eq!(normalize_extension("MP3"), Some(".mp3".to_owned()));
//! assert_eq!(normalize_extension(" ..mp3"), Some(".mp3".to_owned()));
//! assert_eq!(normalize_extension("   "), None);
//! ```

/// Separator placed in front of every normalized extension.
pub const EXTENSION_SEPARATOR: char = '.';

/// Trims surrounding whitespace and lower-cases a configured value.
///
/// Returns `None` when nothing is left after trimming, since an empty name
/// can never match a filesystem entry.
#[must_use]
pub fn fold_case(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Normalizes an extension to lower case with exactly one leading `.`.
///
/// `"mp3"`, `".mp3"`, `" .MP3 "` and `"..mp3"` all normalize to `".mp3"`.
/// Returns `None` for values that are empty or consist only of separators.
#[must_use]
pub fn normalize_extension(value: &str) -> Option<String> {
    let folded = fold_case(value)?;
    let bare = folded.trim_start_matches(EXTENSION_SEPARATOR);
    if bare.is_empty() {
        return None;
    }

    let mut normalized = String::with_capacity(bare.len() + 1);
    normalized.push(EXTENSION_SEPARATOR);
    normalized.push_str(bare);
    Some(normalized)
}
