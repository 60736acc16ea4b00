//! User-facing validation failures

use std::fmt;

use serde::{Deserialize, Serialize};

/// One violated constraint.
///
/// The message is what the editor sees. `record_id` and `field` locate the
/// offending input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub message: String,
    pub record_id: String,
    pub field: String,
}

impl ValidationFailure {
    pub fn new(
        record_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            record_id: record_id.into(),
            field: field.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
