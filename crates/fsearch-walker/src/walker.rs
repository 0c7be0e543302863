//! Breadth-first directory search.
//!
//! This module provides [`FileSearch`], which walks a directory tree level by
//! level using an explicit FIFO work queue, so memory grows with the width
//! of the tree rather than its depth.
//!
//! # Walk
//!
//! 1. The root (or the current directory) is canonicalized and queued.
//! 2. The front directory is popped; excluded directories are dropped here.
//! 3. Its entries are classified without following links:
//!    - regular files are sized, filtered and added to the result set
//!    - directories are collected, unless excluded
//!    - symbolic links are counted and never followed, which is what keeps
//!      link cycles from looping forever
//! 4. Collected sub-directories not queued before are appended to the queue.
//!
//! Every failure is contained to the node it happened on. See
//! [`SearchError`] for how each kind is handled.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use fsearch_core::SearchConfig;
//! use fsearch_walker::FileSearch;
//!
//! let config = SearchConfig::new()
//!     .with_root(Utf8Path::new("/music"))
//!     .with_extensions(&["mp3"]);
//! let result = FileSearch::new(config).search();
//!
//! for path in result.sorted_files() {
//!     println!("[{path}]");
//! }
//! ```

use std::collections::VecDeque;
use std::io::Write;

use camino::{Utf8DirEntry, Utf8Path, Utf8PathBuf};
use fsearch_core::{Config, ProgressConfig, SearchConfig};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, info, trace, warn};

use crate::entry::EntryKind;
use crate::error::SearchError;
use crate::filter::FilterSet;
use crate::progress::SearchProgress;
use crate::SearchResult;

/// Sub-directories found while listing one directory.
type SubDirectories = SmallVec<[Utf8PathBuf; 8]>;

/// A configured, reusable file search.
///
/// Each call to [`search`](Self::search) is an independent run with its own
/// queue, result set and progress counters.
#[derive(Debug, Clone, Default)]
pub struct FileSearch {
    config: SearchConfig,
    progress: ProgressConfig,
}

impl FileSearch {
    /// Creates a search with default progress output.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            progress: ProgressConfig::default(),
        }
    }

    /// Creates a search from a full [`Config`].
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            config: config.search.clone(),
            progress: config.progress,
        }
    }

    /// Replaces the progress output settings.
    #[must_use]
    pub const fn with_progress(mut self, progress: ProgressConfig) -> Self {
        self.progress = progress;
        self
    }

    /// Returns the search configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search, rendering progress to standard output.
    pub fn search(&self) -> SearchResult {
        let mut progress = SearchProgress::stdout(self.progress);
        self.search_with(&mut progress)
    }

    /// Runs the search, reporting through the given progress reporter.
    ///
    /// The reporter is reset first, so one reporter can serve several runs.
    ///
    /// Never fails: an unreachable root yields an empty result whose
    /// [`errors`](SearchResult::errors) say why.
    pub fn search_with<W: Write>(&self, progress: &mut SearchProgress<W>) -> SearchResult {
        progress.reset();

        let configured = self
            .config
            .effective_root()
            .unwrap_or_else(|| Utf8Path::new("."));

        let root = match configured.canonicalize_utf8() {
            Ok(root) => root,
            Err(source) => {
                let mut walk = Walk::new(FilterSet::default(), false, progress);
                walk.report(SearchError::root_unreachable(configured, source));
                walk.progress.finalize();
                return walk.finish(None);
            }
        };

        info!(root = %root, unfiltered = self.config.is_unfiltered(), "Starting search");
        progress.announce_root(&root);

        let filters = FilterSet::from_config(&self.config, &root);
        for dir in filters.excluded_directories() {
            debug!(dir = %dir, "Excluding directory");
        }
        let mut walk = Walk::new(filters, self.config.quit_directory_on_match, progress);

        let mut queue = VecDeque::from([root.clone()]);
        let mut queued: FxHashSet<Utf8PathBuf> = FxHashSet::default();
        queued.insert(root.clone());

        while let Some(dir) = queue.pop_front() {
            if walk.filters.is_excluded_directory(&dir) {
                debug!(dir = %dir, "Skipping excluded directory");
                continue;
            }

            for sub in walk.expand(&dir) {
                if !queued.contains(&sub) {
                    queued.insert(sub.clone());
                    queue.push_back(sub);
                }
            }
        }

        walk.progress.finalize();
        let result = walk.finish(Some(root));

        info!(
            matches = result.stats.matches,
            scanned = result.stats.scanned,
            directories = result.stats.directories,
            errors = result.stats.errors,
            "Search completed"
        );

        result
    }
}

/// State of one search run.
struct Walk<'p, W: Write> {
    filters: FilterSet,
    quit_directory_on_match: bool,
    files: FxHashSet<Utf8PathBuf>,
    errors: Vec<SearchError>,
    progress: &'p mut SearchProgress<W>,
}

impl<'p, W: Write> Walk<'p, W> {
    fn new(
        filters: FilterSet,
        quit_directory_on_match: bool,
        progress: &'p mut SearchProgress<W>,
    ) -> Self {
        Self {
            filters,
            quit_directory_on_match,
            files: FxHashSet::default(),
            errors: Vec::new(),
            progress,
        }
    }

    /// Lists `dir`, handling its files and returning its sub-directories.
    fn expand(&mut self, dir: &Utf8Path) -> SubDirectories {
        let mut subdirs = SubDirectories::new();

        let entries = match dir.read_dir_utf8() {
            Ok(entries) => entries,
            Err(source) => {
                self.report(SearchError::read_dir(dir, source));
                return subdirs;
            }
        };
        self.progress.record_directory();

        // Set once a file of `dir` matched and the rest of its files are skipped.
        let mut files_done = false;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    self.report(SearchError::read_entry(dir, source));
                    continue;
                }
            };

            let kind = entry
                .file_type()
                .map_or(EntryKind::Other, EntryKind::from_file_type);

            match kind {
                EntryKind::File if files_done => continue,
                EntryKind::File => {
                    let Some(path) = canonical(&entry) else {
                        continue;
                    };
                    self.progress.record_visit();
                    let matched = self.handle_file(&entry, path);
                    files_done = matched && self.quit_directory_on_match;
                }
                EntryKind::Directory => {
                    let Some(path) = canonical(&entry) else {
                        continue;
                    };
                    self.progress.record_visit();
                    if self.filters.is_excluded_directory(&path) {
                        debug!(dir = %path, "Skipping excluded directory");
                    } else {
                        subdirs.push(path);
                    }
                }
                EntryKind::Symlink => {
                    trace!(path = %entry.path(), "Not following symbolic link");
                    self.progress.record_visit();
                }
                EntryKind::Other => {
                    self.progress.record_visit();
                }
            }

            self.progress.maybe_render();
        }

        subdirs
    }

    /// Sizes and filters a regular file. Returns `true` if it was added.
    fn handle_file(&mut self, entry: &Utf8DirEntry, path: Utf8PathBuf) -> bool {
        let bytes = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(source) => {
                self.report(SearchError::metadata(path.clone(), source));
                0
            }
        };
        self.progress.record_bytes(bytes);

        if !self.filters.accepts_file(&path) {
            return false;
        }

        if self.files.contains(&path) {
            return false;
        }

        debug!(path = %path, "Matched file");
        self.files.insert(path);
        self.progress.record_match();
        true
    }

    fn report(&mut self, error: SearchError) {
        warn!(path = %error.path(), %error, "Skipping unreachable path");
        self.progress.record_error();
        self.errors.push(error);
    }

    fn finish(self, root: Option<Utf8PathBuf>) -> SearchResult {
        SearchResult {
            root,
            files: self.files,
            stats: self.progress.snapshot(),
            errors: self.errors,
        }
    }
}

/// Canonicalizes an entry, or `None` if it vanished or cannot be resolved.
fn canonical(entry: &Utf8DirEntry) -> Option<Utf8PathBuf> {
    match entry.path().canonicalize_utf8() {
        Ok(path) => Some(path),
        Err(error) => {
            trace!(path = %entry.path(), %error, "Skipping entry that cannot be canonicalized");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_search_new() {
        let search = FileSearch::new(SearchConfig::new().with_extensions(&["rs"]));
        assert_eq!(search.config().exclusive_extensions, vec!["rs"]);
        assert_eq!(search.progress, ProgressConfig::default());
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.search.quit_directory_on_match = true;
        config.progress.enabled = false;

        let search = FileSearch::from_config(&config);
        assert!(search.config().quit_directory_on_match);
        assert!(!search.progress.enabled);
    }

    #[test]
    fn test_with_progress() {
        let quiet = ProgressConfig {
            enabled: false,
            render_interval: 10,
        };
        let search = FileSearch::default().with_progress(quiet);
        assert_eq!(search.progress, quiet);
    }

    #[test]
    fn test_unreachable_root_yields_empty_result() {
        let search = FileSearch::new(
            SearchConfig::new().with_root(Utf8Path::new("/nonexistent/path/that/does/not/exist")),
        );
        let mut progress = SearchProgress::new(Vec::new(), ProgressConfig::default());
        let result = search.search_with(&mut progress);

        assert!(result.root.is_none());
        assert!(result.files.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].is_fatal_to_run());
        assert_eq!(result.stats.errors, 1);

        // The status line is still flushed.
        let out = String::from_utf8(progress.into_inner()).unwrap();
        assert!(out.starts_with("\rMatches: 0 | Searches: 0 |"));
        assert!(out.ends_with('\n'));
    }
}
