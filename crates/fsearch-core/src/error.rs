//! Error types for the fsearch-core crate.
//!
//! This module provides the [`ConfigError`] type for configuration-related
//! errors that can occur while loading or validating settings.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use fsearch_core::ConfigError;
///
/// let error = ConfigError::invalid_option("render_interval", "must be at least 1");
/// assert!(error.to_string().contains("render_interval"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        /// The configuration file path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for [`Config`](crate::Config).
    #[error("failed to parse configuration file {path}: {source}")]
    Parse {
        /// The configuration file path.
        path: Utf8PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("render_interval", "must be at least 1");
        let msg = error.to_string();
        assert!(msg.contains("render_interval"));
        assert!(msg.contains("must be at least 1"));
    }

    #[test]
    fn test_io_display() {
        let error = ConfigError::Io {
            path: Utf8PathBuf::from("/etc/fsearch.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(error.to_string().contains("/etc/fsearch.json"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_parse_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ConfigError::Parse {
            path: Utf8PathBuf::from("broken.json"),
            source,
        };
        assert!(error.to_string().starts_with("failed to parse configuration file broken.json"));
    }
}
