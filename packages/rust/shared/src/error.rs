//! Error types for CiviCode.
//!
//! Library crates use [`CiviCodeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all CiviCode operations.
#[derive(Debug, thiserror::Error)]
pub enum CiviCodeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// HTTP fetch failure: network error, timeout, or non-2xx status.
    /// Always carries the URL that was being fetched.
    #[error("fetch error for {url}: {cause}")]
    Fetch { url: String, cause: String },

    /// HTML parsing or selector error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Tree serialization error.
    #[error("serialize error: {0}")]
    Serialize(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CiviCodeError>;

impl CiviCodeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a fetch error carrying the URL and its underlying cause.
    pub fn fetch(url: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            cause: cause.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
