//! Observable events of the edit pipeline

use std::fmt;

/// Lifecycle events, in the order an edit passes through them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file loaded and validated
    ConfigLoaded,
    /// Edited document accepted for processing
    EditReceived,
    /// Editable sections gathered
    FieldsCollected,
    /// Validation found no failures
    EditValidated,
    /// Validation found failures; nothing written
    EditRejected,
    /// Edited document written
    DocumentSaved,
    /// Audit entry written
    AuditWritten,
    /// Structural or persistence error
    EditFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::EditReceived => "EDIT_RECEIVED",
            Event::FieldsCollected => "FIELDS_COLLECTED",
            Event::EditValidated => "EDIT_VALIDATED",
            Event::EditRejected => "EDIT_REJECTED",
            Event::DocumentSaved => "DOCUMENT_SAVED",
            Event::AuditWritten => "AUDIT_WRITTEN",
            Event::EditFailed => "EDIT_FAILED",
        }
    }

    /// Returns true if the event reports an error
    pub fn is_error(&self) -> bool {
        matches!(self, Event::EditFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
