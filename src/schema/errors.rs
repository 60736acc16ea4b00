//! Schema error types
//!
//! A schema error means the edit cannot be judged at all: the fragment for a
//! field is missing or malformed. These are structural failures and abort the
//! edit before anything is written. They are never reported as user-facing
//! validation messages.
//!
//! Error codes:
//! - EDIT_SCHEMA_UNRESOLVED
//! - EDIT_SCHEMA_TYPE_MISSING
//! - EDIT_SCHEMA_INVALID_KEYWORD
//! - EDIT_SCHEMA_INVALID_PATTERN

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// No fragment found for a collected field
    EditSchemaUnresolved,
    /// Fragment has no usable `type`
    EditSchemaTypeMissing,
    /// A constraint keyword holds a value of the wrong shape
    EditSchemaInvalidKeyword,
    /// `pattern` is not a valid regular expression
    EditSchemaInvalidPattern,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::EditSchemaUnresolved => "EDIT_SCHEMA_UNRESOLVED",
            SchemaErrorCode::EditSchemaTypeMissing => "EDIT_SCHEMA_TYPE_MISSING",
            SchemaErrorCode::EditSchemaInvalidKeyword => "EDIT_SCHEMA_INVALID_KEYWORD",
            SchemaErrorCode::EditSchemaInvalidPattern => "EDIT_SCHEMA_INVALID_PATTERN",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error with the field and keyword it concerns
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    field: String,
    keyword: Option<String>,
}

impl SchemaError {
    /// No fragment could be found for the field
    pub fn unresolved(field: impl Into<String>, schema_key: &str) -> Self {
        let field = field.into();
        Self {
            code: SchemaErrorCode::EditSchemaUnresolved,
            message: format!(
                "No schema fragment for field '{}' (expected '{}.properties.{}')",
                field, schema_key, field
            ),
            field,
            keyword: None,
        }
    }

    /// The fragment is missing `type` or it is not a string
    pub fn type_missing(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            code: SchemaErrorCode::EditSchemaTypeMissing,
            message: format!("Schema fragment for field '{}' has no 'type'", field),
            field,
            keyword: Some("type".into()),
        }
    }

    /// A keyword value has the wrong shape
    pub fn invalid_keyword(
        field: impl Into<String>,
        keyword: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let keyword = keyword.into();
        Self {
            code: SchemaErrorCode::EditSchemaInvalidKeyword,
            message: format!(
                "Schema keyword '{}' for field '{}' is invalid: {}",
                keyword,
                field,
                reason.into()
            ),
            field,
            keyword: Some(keyword),
        }
    }

    /// The pattern does not compile
    pub fn invalid_pattern(field: impl Into<String>, pattern: &str, reason: impl fmt::Display) -> Self {
        let field = field.into();
        Self {
            code: SchemaErrorCode::EditSchemaInvalidPattern,
            message: format!(
                "Pattern '{}' for field '{}' does not compile: {}",
                pattern, field, reason
            ),
            field,
            keyword: Some("pattern".into()),
        }
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The field whose fragment is at fault
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The offending keyword, when one is known
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaErrorCode::EditSchemaUnresolved.code(), "EDIT_SCHEMA_UNRESOLVED");
        assert_eq!(SchemaErrorCode::EditSchemaTypeMissing.code(), "EDIT_SCHEMA_TYPE_MISSING");
        assert_eq!(SchemaErrorCode::EditSchemaInvalidKeyword.code(), "EDIT_SCHEMA_INVALID_KEYWORD");
        assert_eq!(SchemaErrorCode::EditSchemaInvalidPattern.code(), "EDIT_SCHEMA_INVALID_PATTERN");
    }

    #[test]
    fn test_unresolved_names_expected_path() {
        let err = SchemaError::unresolved("Amount", "DynamicSectionEditableAmount");
        assert_eq!(err.field(), "Amount");
        assert!(err.message().contains("DynamicSectionEditableAmount.properties.Amount"));
        assert!(err.keyword().is_none());
    }

    #[test]
    fn test_display_includes_code() {
        let err = SchemaError::invalid_keyword("Qty", "minimum", "expected a number");
        let display = format!("{}", err);
        assert!(display.starts_with("EDIT_SCHEMA_INVALID_KEYWORD"));
        assert!(display.contains("minimum"));
        assert!(display.contains("Qty"));
    }
}
