//! Edit pipeline errors
//!
//! Validation failures are not errors; they come back as the failure list.
//! An `EditError` means the edit could not be judged or could not be stored:
//! - Structural (`Parse`, `Schema`, `DocumentKey`): nothing was written
//! - `Persistence`: validation passed and a write failed; the other write may
//!   already have happened

use thiserror::Error;

use crate::schema::SchemaError;
use crate::storage::StorageError;
use crate::tenant::TenantError;

/// Result type for edit operations
pub type EditResult<T> = Result<T, EditError>;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Malformed document: {0}")]
    Parse(String),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Document key unavailable: {0}")]
    DocumentKey(#[from] TenantError),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] StorageError),
}

impl EditError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            EditError::Parse(_) => "EDIT_MALFORMED_DOCUMENT",
            EditError::Schema(err) => err.code().code(),
            EditError::DocumentKey(_) => "EDIT_DOCUMENT_KEY_UNAVAILABLE",
            EditError::Persistence(err) => err.code(),
        }
    }

    /// True when the edit was rejected before any write was issued
    pub fn is_structural(&self) -> bool {
        !matches!(self, EditError::Persistence(_))
    }
}

impl From<serde_json::Error> for EditError {
    fn from(err: serde_json::Error) -> Self {
        EditError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_classes() {
        let parse = EditError::Parse("eof".into());
        assert_eq!(parse.code(), "EDIT_MALFORMED_DOCUMENT");
        assert!(parse.is_structural());

        let schema: EditError = SchemaError::type_missing("Amount").into();
        assert_eq!(schema.code(), "EDIT_SCHEMA_TYPE_MISSING");
        assert!(schema.is_structural());

        let key: EditError = TenantError::MissingIdentifier("ApprovalIdentifier".into()).into();
        assert_eq!(key.code(), "EDIT_DOCUMENT_KEY_UNAVAILABLE");

        let storage: EditError = StorageError::IoError("disk".into()).into();
        assert_eq!(storage.code(), "EDIT_STORAGE_IO_ERROR");
        assert!(!storage.is_structural());
    }
}
