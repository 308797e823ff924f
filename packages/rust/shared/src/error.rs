//! Error types for iconforge.
//!
//! Library crates use [`IconForgeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all iconforge operations.
#[derive(Debug, thiserror::Error)]
pub enum IconForgeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Markup could not be parsed as a single well-formed element.
    #[error("markup error at byte {position}: {message}")]
    Markup { message: String, position: u64 },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (missing root directory, bad identity, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// JSON or TOML serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, IconForgeError>;

impl IconForgeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a markup error at a byte offset of the source document.
    pub fn markup(msg: impl Into<String>, position: u64) -> Self {
        Self::Markup {
            message: msg.into(),
            position,
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
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
