//! Search statistics.
//!
//! This module provides [`SearchStats`], the counters a single search run
//! accumulates, and [`StatsSnapshot`] for point-in-time views.
//!
//! A search is single-threaded and owns its counters exclusively, so these
//! are plain integers mutated through `&mut`. Counters only ever grow during
//! a run; a new run starts from a fresh [`SearchStats`].
//!
//! # Examples
//!
//! ```
//! use fsearch_walker::SearchStats;
//!
//! let mut stats = SearchStats::new();
//! stats.increment_scanned();
//! stats.add_bytes(2048);
//! stats.increment_matches();
//!
//! let snapshot = stats.snapshot(std::time::Duration::from_millis(5));
//! assert_eq!(snapshot.scanned, 1);
//! assert_eq!(snapshot.bytes, 2048);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Counters for one search run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchStats {
    /// Entries classified (files, directories, symlinks and others).
    scanned: u64,
    /// Files added to the result set.
    matches: u64,
    /// Cumulative size of scanned regular files.
    bytes: u64,
    /// Directories whose listing was read.
    directories: u64,
    /// Non-fatal errors encountered.
    errors: u64,
}

impl SearchStats {
    /// Creates a new [`SearchStats`] with all counters at zero.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the scanned-entries counter.
    #[inline]
    pub fn increment_scanned(&mut self) {
        self.scanned = self.scanned.saturating_add(1);
    }

    /// Increments the match counter.
    #[inline]
    pub fn increment_matches(&mut self) {
        self.matches = self.matches.saturating_add(1);
    }

    /// Adds the size of a scanned file.
    #[inline]
    pub fn add_bytes(&mut self, bytes: u64) {
        self.bytes = self.bytes.saturating_add(bytes);
    }

    /// Increments the expanded-directories counter.
    #[inline]
    pub fn increment_directories(&mut self) {
        self.directories = self.directories.saturating_add(1);
    }

    /// Increments the error counter.
    #[inline]
    pub fn increment_errors(&mut self) {
        self.errors = self.errors.saturating_add(1);
    }

    /// Number of entries scanned so far.
    #[inline]
    #[must_use]
    pub const fn scanned(&self) -> u64 {
        self.scanned
    }

    /// Number of matches so far.
    #[inline]
    #[must_use]
    pub const fn matches(&self) -> u64 {
        self.matches
    }

    /// Cumulative bytes of scanned files so far.
    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Returns a snapshot of all counters along with the elapsed time.
    #[must_use]
    pub fn snapshot(&self, elapsed: Duration) -> StatsSnapshot {
        StatsSnapshot {
            scanned: self.scanned,
            matches: self.matches,
            bytes: self.bytes,
            directories: self.directories,
            errors: self.errors,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// A point-in-time snapshot of search statistics.
///
/// # Examples
///
/// ```
/// use fsearch_walker::StatsSnapshot;
///
/// let snap = StatsSnapshot {
///     scanned: 200,
///     matches: 50,
///     ..Default::default()
/// };
/// assert!((snap.match_rate() - 25.0).abs() < 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Entries scanned.
    pub scanned: u64,
    /// Files matched.
    pub matches: u64,
    /// Cumulative bytes of scanned files.
    pub bytes: u64,
    /// Directories expanded.
    pub directories: u64,
    /// Non-fatal errors.
    pub errors: u64,
    /// Wall-clock time since the search started, in milliseconds.
    pub elapsed_ms: u64,
}

impl StatsSnapshot {
    /// Returns the share of scanned entries that matched, as a percentage.
    ///
    /// Returns 0.0 if nothing was scanned.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Acceptable for statistics display
    pub fn match_rate(&self) -> f64 {
        if self.scanned == 0 {
            return 0.0;
        }

        (self.matches as f64 / self.scanned as f64) * 100.0
    }
}
