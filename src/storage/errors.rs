//! # Edit Storage Errors

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence failures, surfaced to the caller unchanged
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Checksum mismatch for {0}")]
    ChecksumMismatch(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl StorageError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::DocumentNotFound(_) => "EDIT_STORAGE_NOT_FOUND",
            StorageError::InvalidKey(_) => "EDIT_STORAGE_INVALID_KEY",
            StorageError::ChecksumMismatch(_) => "EDIT_STORAGE_CORRUPTION",
            StorageError::Serialization(_) => "EDIT_STORAGE_SERIALIZATION",
            StorageError::IoError(_) => "EDIT_STORAGE_IO_ERROR",
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}
