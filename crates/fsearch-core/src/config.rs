//! Configuration structures for the fsearch tool.
//!
//! This module provides configuration types for all components:
//!
//! - [`SearchConfig`] - Root path, inclusion filters and excluded directories
//! - [`ProgressConfig`] - Console progress rendering
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`]. An all-default
//! [`SearchConfig`] searches the current directory with no filters, which
//! returns every regular file below it.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of scanned entries between two progress renders.
pub const DEFAULT_RENDER_INTERVAL: u64 = 500;

/// Configuration for a single search run.
///
/// Every filter list is optional: an empty list places no constraint on
/// the results. Values are matched case-insensitively.
///
/// # Examples
///
/// ```
/// use fsearch_core::SearchConfig;
/// use camino::Utf8Path;
///
/// let config = SearchConfig::new()
///     .with_root(Utf8Path::new("/music"))
///     .with_extensions(&["mp3", ".flac"])
///     .with_exclude_directories(&["podcasts"]);
///
/// assert_eq!(config.effective_root().map(|p| p.as_str()), Some("/music"));
/// assert_eq!(config.exclusive_extensions.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Directory to search. `None` or an empty path means the current
    /// working directory.
    pub root: Option<Utf8PathBuf>,

    /// Full file names (including extension) a result must have.
    pub exclusive_filenames: Vec<String>,

    /// File names without their final extension a result must have.
    pub exclusive_file_stems: Vec<String>,

    /// Extensions a result must have, with or without the leading `.`.
    pub exclusive_extensions: Vec<String>,

    /// Directories that are never descended into. Relative entries are
    /// resolved against the search root.
    pub exclude_directories: Vec<Utf8PathBuf>,

    /// Stop evaluating the remaining files of a directory once one of its
    /// files has matched. Sub-directories are still searched.
    pub quit_directory_on_match: bool,
}

impl SearchConfig {
    /// Creates an unfiltered configuration rooted at the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory to search.
    #[must_use]
    pub fn with_root(mut self, root: &Utf8Path) -> Self {
        self.root = Some(root.to_owned());
        self
    }

    /// Adds full file names to the filename filter.
    #[must_use]
    pub fn with_filenames(mut self, names: &[&str]) -> Self {
        self.exclusive_filenames
            .extend(names.iter().map(ToString::to_string));
        self
    }

    /// Adds stems to the stem filter.
    #[must_use]
    pub fn with_file_stems(mut self, stems: &[&str]) -> Self {
        self.exclusive_file_stems
            .extend(stems.iter().map(ToString::to_string));
        self
    }

    /// Adds extensions to the extension filter.
    #[must_use]
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.exclusive_extensions
            .extend(extensions.iter().map(ToString::to_string));
        self
    }

    /// Adds directories that must not be descended into.
    #[must_use]
    pub fn with_exclude_directories(mut self, dirs: &[&str]) -> Self {
        self.exclude_directories
            .extend(dirs.iter().map(|d| Utf8PathBuf::from(*d)));
        self
    }

    /// Configures whether a directory's remaining files are skipped after
    /// its first match.
    #[must_use]
    pub const fn with_quit_directory_on_match(mut self, quit: bool) -> Self {
        self.quit_directory_on_match = quit;
        self
    }

    /// Returns the configured root, or `None` when the current directory
    /// should be searched.
    #[must_use]
    pub fn effective_root(&self) -> Option<&Utf8Path> {
        self.root
            .as_deref()
            .filter(|root| !root.as_str().trim().is_empty())
    }

    /// Returns `true` if no filename, stem or extension filter is set.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.exclusive_filenames.is_empty()
            && self.exclusive_file_stems.is_empty()
            && self.exclusive_extensions.is_empty()
    }
}

/// Configuration for console progress output.
///
/// # Examples
///
/// ```
/// use fsearch_core::ProgressConfig;
///
/// let config = ProgressConfig::default();
/// assert!(config.enabled);
/// assert_eq!(config.render_interval, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Whether the status line is written at all.
    pub enabled: bool,

    /// Number of scanned entries between two renders of the status line.
    pub render_interval: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            render_interval: DEFAULT_RENDER_INTERVAL,
        }
    }
}

/// Root configuration for the fsearch tool.
///
/// # Examples
///
/// ```
/// use fsearch_core::Config;
///
/// let config: Config = serde_json::from_str(r#"{"search": {"exclusive_extensions": ["mp3"]}}"#)?;
/// assert_eq!(config.search.exclusive_extensions, vec!["mp3"]);
/// assert!(config.progress.enabled);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search configuration.
    pub search: SearchConfig,

    /// Progress output configuration.
    pub progress: ProgressConfig,
}

impl Config {
    /// Loads and validates a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks option values that the type system cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progress.render_interval == 0 {
            return Err(ConfigError::invalid_option(
                "progress.render_interval",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
