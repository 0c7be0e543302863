//! Inclusion filters and directory exclusion.
//!
//! A [`FilterSet`] is built once per search from a [`SearchConfig`] and then
//! evaluated against every candidate path. Each inclusion filter passes
//! trivially when its configured set is empty:
//!
//! | Filter | Compared against |
//! |--------|------------------|
//! | filename | last path component, case-folded |
//! | stem | last component without its final extension, case-folded |
//! | extension | final extension, normalized to `.ext` lower case |
//!
//! A file is accepted when all three pass and its parent directory is not
//! excluded.
//!
//! # Examples
//!
//! ```
//! use camino::Utf8Path;
//! use fsearch_core::SearchConfig;
//! use fsearch_walker::FilterSet;
//!
//! let config = SearchConfig::new().with_extensions(&["MP3"]);
//! let filters = FilterSet::from_config(&config, Utf8Path::new("/music"));
//!
//! assert!(filters.accepts_file(Utf8Path::new("/music/song.mp3")));
//! assert!(!filters.accepts_file(Utf8Path::new("/music/cover.jpg")));
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use fsearch_core::{fold_case, normalize_extension, SearchConfig};
use rustc_hash::FxHashSet;
use tracing::debug;

/// The per-run set of filename, stem, extension and directory rules.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filenames: FxHashSet<String>,
    stems: FxHashSet<String>,
    extensions: FxHashSet<String>,
    excluded_dirs: FxHashSet<Utf8PathBuf>,
}

impl FilterSet {
    /// Builds the filters for a search rooted at `root`.
    ///
    /// Filter values are normalized; values that are empty after trimming
    /// are dropped. Relative excluded directories are resolved against
    /// `root`, and every excluded directory is canonicalized when it exists
    /// so it compares equal to the canonical paths met during the walk.
    pub fn from_config(config: &SearchConfig, root: &Utf8Path) -> Self {
        let filenames = config
            .exclusive_filenames
            .iter()
            .filter_map(|name| fold_case(name))
            .collect();
        let stems = config
            .exclusive_file_stems
            .iter()
            .filter_map(|stem| fold_case(stem))
            .collect();
        let extensions = config
            .exclusive_extensions
            .iter()
            .filter_map(|ext| normalize_extension(ext))
            .collect();
        let excluded_dirs = config
            .exclude_directories
            .iter()
            .filter(|dir| !dir.as_str().trim().is_empty())
            .map(|dir| resolve_excluded_dir(dir, root))
            .collect();

        Self {
            filenames,
            stems,
            extensions,
            excluded_dirs,
        }
    }

    /// Returns `true` if the filename filter is empty or contains the
    /// path's last component, lower-cased. The name itself is not trimmed.
    pub fn matches_filename(&self, path: &Utf8Path) -> bool {
        if self.filenames.is_empty() {
            return true;
        }
        path.file_name()
            .is_some_and(|name| self.filenames.contains(&name.to_lowercase()))
    }

    /// Returns `true` if the stem filter is empty or contains the path's
    /// stem.
    pub fn matches_stem(&self, path: &Utf8Path) -> bool {
        if self.stems.is_empty() {
            return true;
        }
        path.file_stem()
            .is_some_and(|stem| self.stems.contains(&stem.to_lowercase()))
    }

    /// Returns `true` if the extension filter is empty or contains the
    /// path's normalized extension. Paths without an extension only pass an
    /// empty filter.
    pub fn matches_extension(&self, path: &Utf8Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(normalize_extension)
            .is_some_and(|ext| self.extensions.contains(&ext))
    }

    /// Returns `true` if `dir` is one of the excluded directories.
    pub fn is_excluded_directory(&self, dir: &Utf8Path) -> bool {
        !self.excluded_dirs.is_empty() && self.excluded_dirs.contains(dir)
    }

    /// Returns `true` if the file's immediate parent is excluded.
    pub fn is_excluded_file(&self, file: &Utf8Path) -> bool {
        file.parent()
            .filter(|parent| !parent.as_str().is_empty())
            .is_some_and(|parent| self.is_excluded_directory(parent))
    }

    /// Returns `true` if the file passes every inclusion filter and does not
    /// sit directly in an excluded directory.
    pub fn accepts_file(&self, file: &Utf8Path) -> bool {
        let filename = self.matches_filename(file);
        let stem = self.matches_stem(file);
        let extension = self.matches_extension(file);
        let excluded = self.is_excluded_file(file);
        filename && stem && extension && !excluded
    }

    /// Returns the resolved excluded directories.
    pub fn excluded_directories(&self) -> impl Iterator<Item = &Utf8Path> {
        self.excluded_dirs.iter().map(Utf8PathBuf::as_path)
    }
}

/// Resolves an excluded directory to the form used for comparisons.
fn resolve_excluded_dir(dir: &Utf8Path, root: &Utf8Path) -> Utf8PathBuf {
    let joined = if dir.is_absolute() {
        dir.to_owned()
    } else {
        root.join(dir)
    };

    match joined.canonicalize_utf8() {
        Ok(canonical) => canonical,
        Err(error) => {
            debug!(dir = %joined, %error, "Excluded directory not canonicalized, comparing as given");
            joined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "/nonexistent/fsearch-root";

    fn filters(config: &SearchConfig) -> FilterSet {
        FilterSet::from_config(config, Utf8Path::new(ROOT))
    }

    #[test]
    fn test_empty_filters_accept_everything() {
        let filters = filters(&SearchConfig::new());
        assert!(filters.accepts_file(Utf8Path::new("/a/b.txt")));
        assert!(filters.accepts_file(Utf8Path::new("/a/Makefile")));
        assert!(filters.accepts_file(Utf8Path::new("/a/.bashrc")));
        assert!(!filters.is_excluded_directory(Utf8Path::new("/a")));
    }

    #[test]
    fn test_filename_filter() {
        let filters = filters(&SearchConfig::new().with_filenames(&["Cargo.TOML", "  "]));
        assert!(filters.matches_filename(Utf8Path::new("/src/cargo.toml")));
        assert!(filters.matches_filename(Utf8Path::new("/src/CARGO.toml")));
        assert!(!filters.matches_filename(Utf8Path::new("/src/Cargo.lock")));
        assert!(!filters.matches_filename(Utf8Path::new("/")));
    }

    #[test]
    fn test_filesystem_names_are_not_trimmed() {
        let filters = filters(
            &SearchConfig::new()
                .with_filenames(&["notes.txt"])
                .with_file_stems(&["notes"]),
        );
        assert!(!filters.matches_filename(Utf8Path::new("/docs/notes.txt ")));
        assert!(!filters.matches_filename(Utf8Path::new("/docs/ notes.txt")));
        assert!(!filters.matches_stem(Utf8Path::new("/docs/notes .txt")));
        assert!(filters.matches_stem(Utf8Path::new("/docs/NOTES.txt")));
    }

    #[test]
    fn test_stem_filter() {
        let filters = filters(&SearchConfig::new().with_file_stems(&["README", "archive.tar"]));
        assert!(filters.matches_stem(Utf8Path::new("/docs/readme.md")));
        assert!(filters.matches_stem(Utf8Path::new("/docs/README")));
        assert!(filters.matches_stem(Utf8Path::new("/dl/archive.tar.gz")));
        assert!(!filters.matches_stem(Utf8Path::new("/dl/archive.zip")));
    }

    #[test]
    fn test_extension_filter_normalizes_both_sides() {
        for configured in ["mp3", ".mp3", ".MP3", " mp3 "] {
            let filters = filters(&SearchConfig::new().with_extensions(&[configured]));
            assert!(
                filters.matches_extension(Utf8Path::new("/music/song.mp3")),
                "{configured:?} should match song.mp3"
            );
            assert!(filters.matches_extension(Utf8Path::new("/music/b.MP3")));
            assert!(!filters.matches_extension(Utf8Path::new("/music/a.txt")));
        }
    }

    #[test]
    fn test_extension_filter_rejects_extensionless() {
        let filters = filters(&SearchConfig::new().with_extensions(&["txt"]));
        assert!(!filters.matches_extension(Utf8Path::new("/etc/hosts")));
        assert!(!filters.matches_extension(Utf8Path::new("/home/.txt")));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let filters = filters(&SearchConfig::new().with_extensions(&["", "."]));
        assert!(filters.matches_extension(Utf8Path::new("/any/file")));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let filters = filters(
            &SearchConfig::new()
                .with_file_stems(&["song"])
                .with_extensions(&["mp3"]),
        );
        assert!(filters.accepts_file(Utf8Path::new("/m/song.mp3")));
        assert!(!filters.accepts_file(Utf8Path::new("/m/song.wav")));
        assert!(!filters.accepts_file(Utf8Path::new("/m/other.mp3")));
    }

    #[test]
    fn test_relative_excluded_directory_resolves_against_root() {
        let filters = filters(
            &SearchConfig::new().with_exclude_directories(&["skip", "/elsewhere/abs", ""]),
        );
        let skip = Utf8PathBuf::from(ROOT).join("skip");

        assert!(filters.is_excluded_directory(&skip));
        assert!(filters.is_excluded_directory(Utf8Path::new("/elsewhere/abs")));
        assert!(!filters.is_excluded_directory(Utf8Path::new(ROOT)));
        assert_eq!(filters.excluded_directories().count(), 2);
    }

    #[test]
    fn test_excluded_file_checks_immediate_parent() {
        let filters = filters(&SearchConfig::new().with_exclude_directories(&["skip"]));
        let root = Utf8PathBuf::from(ROOT);

        assert!(filters.is_excluded_file(&root.join("skip/y.txt")));
        assert!(!filters.accepts_file(&root.join("skip/y.txt")));
        assert!(!filters.is_excluded_file(&root.join("keep/x.txt")));
        assert!(!filters.is_excluded_file(Utf8Path::new("bare.txt")));
    }
}
