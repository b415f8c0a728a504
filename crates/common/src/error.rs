//! Error types shared across hmdscan crates.

use std::path::PathBuf;

/// Top-level error type for hmdscan operations.
///
/// Discovery itself never fails; these cover the edges around it such as
/// opening a platform display source or loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum HmdscanError {
    #[error("Platform error: {message}")]
    Platform { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Snapshot error: {message}")]
    Snapshot { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HmdscanError.
pub type HmdscanResult<T> = Result<T, HmdscanError>;

impl HmdscanError {
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
