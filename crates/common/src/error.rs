//! Error types shared across uidrive crates.

use std::path::PathBuf;

/// Top-level error type for uidrive operations.
#[derive(Debug, thiserror::Error)]
pub enum UidriveError {
    /// The caller violated a precondition (empty kind set, too few pointers, ...).
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Injection error: {message}")]
    Injection { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using UidriveError.
pub type UidriveResult<T> = Result<T, UidriveError>;

impl UidriveError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: msg.into(),
        }
    }

    pub fn injection(msg: impl Into<String>) -> Self {
        Self::Injection {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error reports a caller programming mistake.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
