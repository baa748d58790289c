//! Error types for mounting a table of contents.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported synchronously when configuring or mounting.
///
/// Once mounted, the pipeline has no runtime error channel: its inputs are
/// signals, which always hold a value.
#[derive(Debug, Error)]
pub enum TocError {
    /// Link selector could not be parsed.
    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    /// Configuration text is not valid TOML for [`crate::TocConfig`].
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
