//! Tenant context and document-key derivation
//!
//! Each tenant decides how an edited document is keyed in storage. The key
//! is derived from the document's identifier node (by default
//! `ApprovalIdentifier`) by a [`DocumentKeyRule`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result type for key derivation
pub type TenantResult<T> = Result<T, TenantError>;

/// Document-key derivation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TenantError {
    #[error("Document has no '{0}' node")]
    MissingIdentifier(String),

    #[error("Identifier field '{0}' is missing or empty")]
    MissingKeyField(String),

    #[error("Tenant '{0}' defines no document key fields")]
    NoKeyFields(String),
}

/// Tenant metadata the engine needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    /// Tenant identifier, also the storage namespace (default: "default")
    #[serde(default = "default_tenant_id")]
    pub tenant_id: String,

    /// Top-level node holding the document identity (default: "ApprovalIdentifier")
    #[serde(default = "default_identifier_key")]
    pub identifier_key: String,

    /// Identifier fields making up the key, in order (default: ["DisplayDocumentNumber"])
    #[serde(default = "default_document_key_fields")]
    pub document_key_fields: Vec<String>,
}

fn default_tenant_id() -> String {
    "default".to_string()
}

fn default_identifier_key() -> String {
    "ApprovalIdentifier".to_string()
}

fn default_document_key_fields() -> Vec<String> {
    vec!["DisplayDocumentNumber".to_string()]
}

impl Default for TenantContext {
    fn default() -> Self {
        Self {
            tenant_id: default_tenant_id(),
            identifier_key: default_identifier_key(),
            document_key_fields: default_document_key_fields(),
        }
    }
}

impl TenantContext {
    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = tenant_id.into();
        self
    }

    /// Finds the identifier node of a document.
    pub fn identifier<'a>(&self, document: &'a Value) -> TenantResult<&'a Value> {
        document
            .get(&self.identifier_key)
            .filter(|node| node.is_object())
            .ok_or_else(|| TenantError::MissingIdentifier(self.identifier_key.clone()))
    }
}

/// Computes the persistence key of a document from its identifier node.
///
/// The same identifier must always produce the same key.
pub trait DocumentKeyRule: Send + Sync {
    fn document_key(&self, tenant: &TenantContext, identifier: &Value) -> TenantResult<String>;
}

/// Joins the tenant's key fields with `|`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldJoinKeyRule;

/// Separator between key field values
pub const KEY_SEPARATOR: &str = "|";

impl DocumentKeyRule for FieldJoinKeyRule {
    fn document_key(&self, tenant: &TenantContext, identifier: &Value) -> TenantResult<String> {
        if tenant.document_key_fields.is_empty() {
            return Err(TenantError::NoKeyFields(tenant.tenant_id.clone()));
        }

        let parts = tenant
            .document_key_fields
            .iter()
            .map(|field| match identifier.get(field) {
                Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
                Some(Value::Number(n)) => Ok(n.to_string()),
                _ => Err(TenantError::MissingKeyField(field.clone())),
            })
            .collect::<TenantResult<Vec<_>>>()?;

        Ok(parts.join(KEY_SEPARATOR))
    }
}
