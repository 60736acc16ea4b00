//! Editable field records produced by the collector
//!
//! A record is the normalized form of one editable section:
//! - `id`: the section identifier
//! - `fields`: field name to field node, in document order
//! - `schema`: the `jsonSchema` node attached to the section, if any
//!
//! Records are immutable once built.

use serde::Serialize;
use serde_json::{Map, Value};

/// Key holding the edited value on a field node.
pub const NEW_VALUE_KEY: &str = "NewValue";

/// Read-only view over one field node of an editable section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldValue<'a> {
    node: &'a Value,
}

impl<'a> FieldValue<'a> {
    pub fn new(node: &'a Value) -> Self {
        Self { node }
    }

    /// Returns the edited value as text.
    ///
    /// Returns `None` when `NewValue` is missing, null, or the empty string.
    /// Non-string scalars read as their JSON text, so `150` reads as `"150"`.
    pub fn new_value(&self) -> Option<String> {
        let text = match self.node.get(NEW_VALUE_KEY)? {
            Value::Null => return None,
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// The underlying field node, unchanged.
    pub fn as_value(&self) -> &'a Value {
        self.node
    }
}

/// One editable section found in a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditableFieldRecord {
    id: String,
    fields: Map<String, Value>,
    #[serde(rename = "jsonSchema", skip_serializing_if = "Option::is_none")]
    schema: Option<Map<String, Value>>,
}

impl EditableFieldRecord {
    /// Creates a record. Field order is kept as given.
    pub fn new(
        id: impl Into<String>,
        fields: Map<String, Value>,
        schema: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            id: id.into(),
            fields,
            schema,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Iterates fields in discovery order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldValue<'_>)> {
        self.fields
            .iter()
            .map(|(name, node)| (name.as_str(), FieldValue::new(node)))
    }

    /// Looks up a single field by name.
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.fields.get(name).map(FieldValue::new)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// The attached schema node, if the section had one.
    pub fn schema(&self) -> Option<&Map<String, Value>> {
        self.schema.as_ref()
    }

    /// Projects the record down to `{id, fields}` for auditing.
    ///
    /// The schema fragment never reaches the audit trail.
    pub fn audited(&self) -> AuditedSection<'_> {
        AuditedSection {
            id: &self.id,
            fields: &self.fields,
        }
    }
}

/// The `{id, fields}` projection of a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AuditedSection<'a> {
    pub id: &'a str,
    pub fields: &'a Map<String, Value>,
}
