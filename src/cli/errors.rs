//! CLI-specific error types
//!
//! Every error reaching the binary boundary becomes a `CliError` with an
//! `EDIT_CLI_*` code.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::edit::EditError;
use crate::storage::StorageError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout/input file)
    IoError,
    /// Input is not a JSON document
    InvalidInput,
    /// Edit could not be judged (schema or document key problem)
    EditRejected,
    /// Store could not be opened or written
    PersistenceFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "EDIT_CLI_CONFIG_ERROR",
            Self::IoError => "EDIT_CLI_IO_ERROR",
            Self::InvalidInput => "EDIT_CLI_INVALID_INPUT",
            Self::EditRejected => "EDIT_CLI_EDIT_REJECTED",
            Self::PersistenceFailed => "EDIT_CLI_PERSISTENCE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        Self::new(
            CliErrorCode::PersistenceFailed,
            format!("{}: {}", e.code(), e),
        )
    }
}

impl From<EditError> for CliError {
    fn from(e: EditError) -> Self {
        let code = match &e {
            EditError::Parse(_) => CliErrorCode::InvalidInput,
            EditError::Persistence(_) => CliErrorCode::PersistenceFailed,
            EditError::Schema(_) | EditError::DocumentKey(_) => CliErrorCode::EditRejected,
        };
        Self::new(code, format!("{}: {}", e.code(), e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaError;

    #[test]
    fn test_edit_errors_map_to_cli_codes() {
        let parse: CliError = EditError::Parse("eof".into()).into();
        assert_eq!(parse.code_str(), "EDIT_CLI_INVALID_INPUT");

        let schema: CliError = EditError::from(SchemaError::unresolved("Amount", "DynamicSectionEditableAmount")).into();
        assert_eq!(schema.code_str(), "EDIT_CLI_EDIT_REJECTED");
        assert!(schema.message().starts_with("EDIT_SCHEMA_UNRESOLVED"));

        let storage: CliError = EditError::from(StorageError::IoError("disk full".into())).into();
        assert_eq!(storage.code(), &CliErrorCode::PersistenceFailed);
    }

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("bad log_level");
        assert_eq!(err.to_string(), "EDIT_CLI_CONFIG_ERROR: bad log_level");
    }
}
