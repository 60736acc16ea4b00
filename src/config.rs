//! Engine configuration
//!
//! Loaded from a JSON file. Every field has a default, so `{}` is a valid
//! configuration:
//!
//! ```json
//! {
//!   "data_dir": "./editgate-data",
//!   "collector": { "marker_key": "Editable", "children_key": "Children",
//!                  "line_items_key": "LineItems", "schema_key": "jsonSchema" },
//!   "tenant": { "tenant_id": "default", "identifier_key": "ApprovalIdentifier",
//!               "document_key_fields": ["DisplayDocumentNumber"] },
//!   "default_client_type": "Web",
//!   "log_level": "info"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collector::CollectorConfig;
use crate::observability::Severity;
use crate::tenant::TenantContext;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Root of the file store (default: "./editgate-data")
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default)]
    pub collector: CollectorConfig,

    #[serde(default)]
    pub tenant: TenantContext,

    /// Client type recorded when the caller names none (default: "Web")
    #[serde(default = "default_client_type")]
    pub default_client_type: String,

    /// Lowest log severity written (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> String {
    "./editgate-data".to_string()
}

fn default_client_type() -> String {
    "Web".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            collector: CollectorConfig::default(),
            tenant: TenantContext::default(),
            default_client_type: default_client_type(),
            log_level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_json_str(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The configured log level
    pub fn log_severity(&self) -> Severity {
        // validate() guarantees the name parses
        Severity::parse(&self.log_level).unwrap_or(Severity::Info)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".into()));
        }

        let keys = [
            ("collector.marker_key", &self.collector.marker_key),
            ("collector.children_key", &self.collector.children_key),
            ("collector.line_items_key", &self.collector.line_items_key),
            ("collector.schema_key", &self.collector.schema_key),
            ("tenant.tenant_id", &self.tenant.tenant_id),
            ("tenant.identifier_key", &self.tenant.identifier_key),
        ];
        for (name, value) in keys {
            if value.is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", name)));
            }
        }

        if self.collector.marker_key == self.collector.children_key {
            return Err(ConfigError::Invalid(
                "collector.marker_key and collector.children_key must differ".into(),
            ));
        }

        // The top-level pass already walks children; a shared key would
        // collect every line item twice.
        if self.collector.children_key == self.collector.line_items_key {
            return Err(ConfigError::Invalid(
                "collector.children_key and collector.line_items_key must differ".into(),
            ));
        }

        if self.tenant.document_key_fields.is_empty()
            || self.tenant.document_key_fields.iter().any(|f| f.is_empty())
        {
            return Err(ConfigError::Invalid(
                "tenant.document_key_fields must list at least one non-empty field".into(),
            ));
        }

        if Severity::parse(&self.log_level).is_none() {
            return Err(ConfigError::Invalid(format!(
                "Invalid log_level: '{}'",
                self.log_level
            )));
        }

        Ok(())
    }
}
