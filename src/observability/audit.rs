//! Edit audit entries
//!
//! An audit entry records who changed which editable fields of which
//! document. It is built only after validation passed, written once, and
//! never changed afterwards.
//!
//! `editableFieldJson` holds the collected sections projected to
//! `{id, fields}`, serialized in collection order. Schema fragments are never
//! part of the audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::collector::{AuditedSection, EditableFieldRecord};

/// One persisted audit record of a successful edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// Unique row identifier, generated per entry.
    pub row_id: Uuid,

    /// Persistence key of the edited document.
    pub document_key: String,

    pub tenant_id: String,

    /// Alias the edit was made under.
    pub editor_alias: String,

    /// Signed-in user, which differs from the alias when editing on behalf.
    pub logged_in_user: String,

    /// Client surface the edit came from.
    pub client_type: String,

    /// Serialized `[{id, fields}, ...]`.
    pub editable_field_json: String,

    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    /// Create a new entry with a fresh row id and the current time.
    pub fn new(document_key: impl Into<String>, editable_field_json: impl Into<String>) -> Self {
        Self {
            row_id: Uuid::new_v4(),
            document_key: document_key.into(),
            tenant_id: String::new(),
            editor_alias: String::new(),
            logged_in_user: String::new(),
            client_type: String::new(),
            editable_field_json: editable_field_json.into(),
            timestamp: Utc::now(),
        }
    }

    /// Builds the entry for a set of collected records.
    pub fn for_records(
        document_key: impl Into<String>,
        records: &[EditableFieldRecord],
    ) -> serde_json::Result<Self> {
        Ok(Self::new(document_key, editable_field_json(records)?))
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = tenant_id.into();
        self
    }

    pub fn with_editor(
        mut self,
        alias: impl Into<String>,
        logged_in_user: impl Into<String>,
        client_type: impl Into<String>,
    ) -> Self {
        self.editor_alias = alias.into();
        self.logged_in_user = logged_in_user.into();
        self.client_type = client_type.into();
        self
    }

    /// Parses `editableFieldJson` back into its sections.
    pub fn sections(&self) -> serde_json::Result<Vec<Value>> {
        serde_json::from_str(&self.editable_field_json)
    }

    /// Serialize to a single JSON line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Serializes records as `[{id, fields}, ...]`, keeping their order.
pub fn editable_field_json(records: &[EditableFieldRecord]) -> serde_json::Result<String> {
    let sections: Vec<AuditedSection<'_>> = records.iter().map(|r| r.audited()).collect();
    serde_json::to_string(&sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, fields: Value) -> EditableFieldRecord {
        EditableFieldRecord::new(
            id,
            fields.as_object().cloned().unwrap(),
            json!({"DynamicSectionEditableX": {}}).as_object().cloned(),
        )
    }

    #[test]
    fn test_editable_field_json_drops_schema() {
        let records = vec![record("1", json!({"Amount": {"NewValue": "50"}}))];
        let json = editable_field_json(&records).unwrap();

        assert_eq!(json, r#"[{"id":"1","fields":{"Amount":{"NewValue":"50"}}}]"#);
        assert!(!json.contains("DynamicSectionEditable"));
    }

    #[test]
    fn test_entry_builder() {
        let records = vec![record("1", json!({}))];
        let entry = AuditEntry::for_records("DOC-1", &records)
            .unwrap()
            .with_tenant("t1")
            .with_editor("alias", "user@contoso.com", "Web");

        assert_eq!(entry.document_key, "DOC-1");
        assert_eq!(entry.tenant_id, "t1");
        assert_eq!(entry.editor_alias, "alias");
        assert_eq!(entry.logged_in_user, "user@contoso.com");
        assert_eq!(entry.client_type, "Web");
    }

    #[test]
    fn test_row_ids_are_unique() {
        let a = AuditEntry::new("DOC", "[]");
        let b = AuditEntry::new("DOC", "[]");
        assert_ne!(a.row_id, b.row_id);
    }

    #[test]
    fn test_json_uses_camel_case_and_reads_back() {
        let entry = AuditEntry::new("DOC", "[]").with_editor("a", "b", "c");
        let line = entry.to_json().unwrap();

        assert!(line.contains("\"editableFieldJson\""));
        assert!(line.contains("\"rowId\""));
        assert!(!line.contains('\n'));

        let back: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_sections_preserve_order() {
        let records = vec![
            record("b", json!({"Z": {"NewValue": "1"}, "A": {"NewValue": "2"}})),
            record("a", json!({})),
        ];
        let entry = AuditEntry::for_records("DOC", &records).unwrap();
        let sections = entry.sections().unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0]["id"], "b");
        let names: Vec<&String> = sections[0]["fields"].as_object().unwrap().keys().collect();
        assert_eq!(names, vec!["Z", "A"]);
    }
}
