use kiosk_core::error::AppError;
use kiosk_formats::FormatError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Database error: {0}")]
    Database(#[from] AppError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Library root not found: {0}")]
    RootNotFound(String),

    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Scanner error: {0}")]
    ScannerError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
