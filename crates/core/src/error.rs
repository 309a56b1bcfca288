//! Error types for Kiosk
//!
//! `AppError` is the shared error currency between the database layer and the
//! library layer. Nothing here is treated as fatal to the whole process: the
//! scanner isolates failures per item and the page resolver collapses read
//! failures into not-found at its boundary.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Kiosk
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Database Errors =====
    /// Database operation failed
    #[error("Database error: {message}")]
    DatabaseError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Database migration failed
    #[error("Migration failed: {version} - {reason}")]
    MigrationFailed { version: String, reason: String },

    /// Record not found in database
    #[error("Record not found: {entity} with {identifier}")]
    RecordNotFound { entity: String, identifier: String },

    // ===== File System Errors =====
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Permission denied for file operation
    #[error("Permission denied: {operation} on {path}")]
    PermissionDenied { operation: String, path: PathBuf },

    /// General I/O error
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },

    // ===== Parsing/Metadata Errors =====
    /// Failed to parse metadata
    #[error("Metadata parse error in {file}: {reason}")]
    MetadataParseError { file: PathBuf, reason: String },

    // ===== Internal =====
    /// Unexpected internal error
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl AppError {
    /// Helper to create a database error from any error type
    pub fn database<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::DatabaseError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper to create a record-not-found error
    pub fn not_found(entity: impl Into<String>, identifier: impl ToString) -> Self {
        Self::RecordNotFound {
            entity: entity.into(),
            identifier: identifier.to_string(),
        }
    }

    /// Returns true if this error means "the requested record is absent"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Implement From for common error types
impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound {
                path: PathBuf::from("unknown"),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                operation: "file operation".to_string(),
                path: PathBuf::from("unknown"),
            },
            _ => Self::IoError {
                message: err.to_string(),
                source: err,
            },
        }
    }
}
