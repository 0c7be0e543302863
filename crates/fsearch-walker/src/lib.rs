//! Breadth-first filtered directory search with live console progress.
//!
//! This crate is the search engine behind the `fsearch` command. It walks a
//! directory tree from a root, collects the canonical paths of regular files
//! that pass the configured filters, and keeps a single status line on the
//! console up to date while doing so.
//!
//! # Overview
//!
//! The main entry point is [`FileSearch`] (or the [`search`] shorthand),
//! which combines:
//!
//! - [`FilterSet`]: filename, stem and extension filters plus excluded directories
//! - [`SearchProgress`]: counters, elapsed time and the status line
//! - [`SearchStats`]: the counters themselves, with [`StatsSnapshot`] views
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use fsearch_core::SearchConfig;
//!
//! let config = SearchConfig::new()
//!     .with_root(Utf8Path::new("/music"))
//!     .with_extensions(&["mp3", "flac"])
//!     .with_exclude_directories(&["podcasts"]);
//!
//! let result = fsearch_walker::search(&config);
//! println!("{} matches in {} entries", result.files.len(), result.stats.scanned);
//! ```
//!
//! # Architecture
//!
//! ```text
//! FileSearch (entry point)
//!     │
//!     ├── Walk (one run: queue, result set, errors)
//!     │       │
//!     │       ├── FilterSet (inclusion + exclusion rules)
//!     │       └── EntryKind (link-not-followed classification)
//!     │
//!     └── SearchProgress (status line)
//!             │
//!             └── SearchStats (counters)
//! ```
//!
//! # Failure Model
//!
//! Searching never fails as a whole. Unreachable roots, unreadable
//! directories and unreadable entries are recorded as [`SearchError`]s in the
//! [`SearchResult`] and the walk continues with what remains.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod entry;
mod error;
mod filter;
mod format;
mod progress;
mod stats;
mod walker;

pub use entry::EntryKind;
pub use error::SearchError;
pub use filter::FilterSet;
pub use format::{format_elapsed, format_size};
pub use progress::SearchProgress;
pub use stats::{SearchStats, StatsSnapshot};
pub use walker::FileSearch;

use camino::{Utf8Path, Utf8PathBuf};
use fsearch_core::SearchConfig;
use rustc_hash::FxHashSet;

/// Outcome of one search run.
#[derive(Debug)]
pub struct SearchResult {
    /// The canonical root that was searched, or `None` if it was unreachable.
    pub root: Option<Utf8PathBuf>,
    /// Canonical paths of every matched file.
    pub files: FxHashSet<Utf8PathBuf>,
    /// Final statistics.
    pub stats: StatsSnapshot,
    /// Non-fatal errors, in the order they were met.
    pub errors: Vec<SearchError>,
}

impl SearchResult {
    /// Returns the matched files in lexicographic order.
    #[must_use]
    pub fn sorted_files(&self) -> Vec<&Utf8Path> {
        let mut files: Vec<&Utf8Path> = self.files.iter().map(Utf8PathBuf::as_path).collect();
        files.sort_unstable();
        files
    }

    /// Returns `true` if nothing matched.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Runs a search with default progress output on standard output.
///
/// Shorthand for `FileSearch::new(config.clone()).search()`.
#[must_use]
pub fn search(config: &SearchConfig) -> SearchResult {
    FileSearch::new(config.clone()).search()
}
