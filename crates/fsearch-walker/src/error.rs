//! Error types for the fsearch-walker crate.
//!
//! This module provides the [`SearchError`] type for failures that can
//! occur while walking a directory tree.

use camino::Utf8PathBuf;

/// Errors that can occur during a search.
///
/// None of these abort a search. They are logged, collected into
/// [`SearchResult::errors`](crate::SearchResult::errors), and the walk
/// carries on with whatever is still reachable.
///
/// # Error Recovery Strategy
///
/// - **Root errors** ([`SearchError::RootUnreachable`]): nothing to walk, the result is empty
/// - **Listing errors** ([`SearchError::ReadDir`]): the directory's subtree is abandoned
/// - **Entry errors** ([`SearchError::ReadEntry`]): the entry is skipped
/// - **Metadata errors** ([`SearchError::Metadata`]): the file counts as zero bytes and is still matched
///
/// # Examples
///
/// ```
/// use fsearch_walker::SearchError;
///
/// fn describe(err: &SearchError) -> String {
///     match err {
///         SearchError::RootUnreachable { path, .. } => format!("no root: {path}"),
///         SearchError::ReadDir { path, .. } => format!("unreadable: {path}"),
///         SearchError::ReadEntry { path, .. } => format!("bad entry in {path}"),
///         SearchError::Metadata { path, .. } => format!("no size: {path}"),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The search root does not exist or cannot be canonicalized.
    #[error("search root {path} is unreachable: {source}")]
    RootUnreachable {
        /// The root as configured.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be listed.
    #[error("failed to list directory {path}: {source}")]
    ReadDir {
        /// The directory that could not be listed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An entry of a directory listing could not be read, for example
    /// because its name is not valid UTF-8.
    #[error("failed to read an entry of {path}: {source}")]
    ReadEntry {
        /// The directory being listed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The size of a regular file could not be queried.
    #[error("failed to read metadata of {path}: {source}")]
    Metadata {
        /// The file whose metadata was unavailable.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SearchError {
    /// Creates a new [`SearchError::RootUnreachable`] error.
    #[inline]
    pub fn root_unreachable(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::RootUnreachable {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`SearchError::ReadDir`] error.
    #[inline]
    pub fn read_dir(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`SearchError::ReadEntry`] error.
    #[inline]
    pub fn read_entry(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::ReadEntry {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`SearchError::Metadata`] error.
    #[inline]
    pub fn metadata(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Metadata {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if nothing could be searched because of this error.
    #[inline]
    #[must_use]
    pub const fn is_fatal_to_run(&self) -> bool {
        matches!(self, Self::RootUnreachable { .. })
    }

    /// Returns the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            Self::RootUnreachable { path, .. }
            | Self::ReadDir { path, .. }
            | Self::ReadEntry { path, .. }
            | Self::Metadata { path, .. } => path,
        }
    }
}
