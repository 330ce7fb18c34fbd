use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

/// Exit status for every fatal error. Drift uses its own status (see
/// [`crate::sync::SyncOutcome::exit_code`]).
pub const FATAL_EXIT_CODE: i32 = 2;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("expected 3 decimal RGB values for {key}, found {found} in {value:?}")]
    MalformedColor {
        key: String,
        value: String,
        found: usize,
    },

    #[error("token key has no color fragments after the prefix: {key}")]
    MalformedKey { key: String },

    #[error("token value for {key} is not a string")]
    NonStringValue { key: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("required path does not exist: {path}")]
    MissingPath { path: PathBuf },

    #[error("no {file} found under {root}")]
    SourceNotFound { root: PathBuf, file: String },
}

impl SyncError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        FATAL_EXIT_CODE
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
