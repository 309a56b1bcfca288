//! Error types for page-source operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type for format operations
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors that can occur reading archives and image folders
#[derive(Debug, Error)]
pub enum FormatError {
    /// File or directory not found
    #[error("Source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Failed to read from the source
    #[error("Failed to read {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    /// Archive could not be opened or decoded
    #[error("Corrupt or unreadable archive {path}: {reason}")]
    CorruptArchive { path: PathBuf, reason: String },
}

impl FormatError {
    pub fn source_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    pub fn read_error(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ReadError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::CorruptArchive {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
