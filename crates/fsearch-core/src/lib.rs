//! Core configuration, errors, and utilities for the fsearch tool.
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - [`SearchConfig`], [`ProgressConfig`] and the root [`Config`]
//! - [`ConfigError`] for configuration loading and validation failures
//! - Filter-value normalization ([`fold_case`], [`normalize_extension`])

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod normalize;

pub use config::{Config, ProgressConfig, SearchConfig, DEFAULT_RENDER_INTERVAL};
pub use error::ConfigError;
pub use normalize::{fold_case, normalize_extension, EXTENSION_SEPARATOR};
