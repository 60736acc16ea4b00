//! Save path for edited approval documents
//!
//! Order of operations for one edit:
//! 1. Parse the raw document
//! 2. Collect editable sections (top level, then line items)
//! 3. Validate every collected field
//! 4. Only with zero failures: derive the document key, save the document
//!    under `(key, "EDITED|" + alias)`, then append the audit entry
//! 5. Return the failure list; empty means saved
//!
//! No write is issued before step 3 has finished for every field.

use serde_json::Value;

use crate::collector::{CollectorConfig, EditableFieldRecord, FieldCollector};
use crate::observability::{
    log_event, log_event_with_fields, AuditEntry, EditMetrics, Event, ObservationScope,
};
use crate::schema::{ConstraintValidator, ValidationFailure};
use crate::storage::{EditStore, StorageError};
use crate::tenant::{DocumentKeyRule, TenantContext};

use super::errors::{EditError, EditResult};

/// Prefix of the row key an edited document is stored under.
pub const EDITED_ROW_PREFIX: &str = "EDITED|";

/// Returns the row key for a document edited by `editor_alias`.
pub fn edited_row_key(editor_alias: &str) -> String {
    format!("{}{}", EDITED_ROW_PREFIX, editor_alias)
}

/// Who made an edit and from where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorIdentity {
    /// Alias the edit is recorded under
    pub alias: String,
    /// Signed-in user; differs from `alias` when acting on someone's behalf
    pub logged_in_user: String,
    pub client_type: String,
}

impl EditorIdentity {
    pub fn new(
        alias: impl Into<String>,
        logged_in_user: impl Into<String>,
        client_type: impl Into<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            logged_in_user: logged_in_user.into(),
            client_type: client_type.into(),
        }
    }
}

/// A parsed and validated edit
#[derive(Debug)]
pub struct EditOutcome {
    pub document: Value,
    pub records: Vec<EditableFieldRecord>,
    pub failures: Vec<ValidationFailure>,
}

/// Runs edits through collection, validation and persistence.
///
/// Holds only shared references and counters, so one service can handle
/// edits of different documents concurrently.
pub struct EditService<'a> {
    collector: &'a CollectorConfig,
    store: &'a dyn EditStore,
    key_rule: &'a dyn DocumentKeyRule,
    validator: ConstraintValidator,
    metrics: EditMetrics,
}

impl<'a> EditService<'a> {
    pub fn new(
        collector: &'a CollectorConfig,
        store: &'a dyn EditStore,
        key_rule: &'a dyn DocumentKeyRule,
    ) -> Self {
        Self {
            collector,
            store,
            key_rule,
            validator: ConstraintValidator::new(),
            metrics: EditMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &EditMetrics {
        &self.metrics
    }

    /// Parses, collects and validates without touching storage.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Parse` for malformed input and `EditError::Schema`
    /// when a field's fragment is missing or malformed.
    pub fn evaluate(&self, raw_document: &str) -> EditResult<EditOutcome> {
        let document: Value = serde_json::from_str(raw_document)?;

        let records = FieldCollector::new(self.collector).collect_document(&document);
        self.metrics.record_collected(records.len());
        log_event_with_fields(
            Event::FieldsCollected,
            &[("records", records.len().to_string().as_str())],
        );

        let failures = self.validator.validate(&records)?;

        Ok(EditOutcome {
            document,
            records,
            failures,
        })
    }

    /// Dry run of the save path: returns the failures the save would report.
    pub fn validate_edited_details(&self, raw_document: &str) -> EditResult<Vec<ValidationFailure>> {
        log_event(Event::EditReceived);
        self.evaluate(raw_document).map(|outcome| outcome.failures)
    }

    /// Validates an edited document and, if it is clean, persists it together
    /// with its audit entry.
    ///
    /// Returns the validation failures; an empty list means both writes were
    /// issued and succeeded.
    ///
    /// # Errors
    ///
    /// - `Parse`, `Schema`, `DocumentKey`: nothing was written
    /// - `Persistence`: a write failed after validation passed
    pub fn save_edited_details(
        &self,
        raw_document: &str,
        tenant: &TenantContext,
        editor: &EditorIdentity,
    ) -> EditResult<Vec<ValidationFailure>> {
        self.metrics.record_received();
        log_event_with_fields(
            Event::EditReceived,
            &[("tenant", tenant.tenant_id.as_str()), ("editor", editor.alias.as_str())],
        );
        let scope = ObservationScope::with_fields(
            "EDIT_SAVE",
            &[("tenant", tenant.tenant_id.as_str()), ("editor", editor.alias.as_str())],
        );

        match self.save_inner(raw_document, tenant, editor) {
            Ok(failures) if failures.is_empty() => {
                self.metrics.record_saved();
                scope.complete_with_fields(&[("outcome", "saved")]);
                Ok(failures)
            }
            Ok(failures) => {
                self.metrics.record_rejected(failures.len());
                log_event_with_fields(
                    Event::EditRejected,
                    &[("failures", failures.len().to_string().as_str())],
                );
                scope.complete_with_fields(&[("outcome", "rejected")]);
                Ok(failures)
            }
            Err(err) => {
                self.metrics.record_failed();
                log_event_with_fields(Event::EditFailed, &[("code", err.code())]);
                scope.fail(&err.to_string());
                Err(err)
            }
        }
    }

    fn save_inner(
        &self,
        raw_document: &str,
        tenant: &TenantContext,
        editor: &EditorIdentity,
    ) -> EditResult<Vec<ValidationFailure>> {
        let outcome = self.evaluate(raw_document)?;
        if !outcome.failures.is_empty() {
            return Ok(outcome.failures);
        }
        log_event_with_fields(
            Event::EditValidated,
            &[("records", outcome.records.len().to_string().as_str())],
        );

        let identifier = tenant.identifier(&outcome.document)?;
        let document_key = self.key_rule.document_key(tenant, identifier)?;
        let row_key = edited_row_key(&editor.alias);

        // Built before the first write so a serialization problem writes nothing.
        let payload = serde_json::to_string(&outcome.document).map_err(StorageError::from)?;
        let entry = AuditEntry::for_records(document_key.as_str(), &outcome.records)
            .map_err(StorageError::from)?
            .with_tenant(tenant.tenant_id.as_str())
            .with_editor(
                editor.alias.as_str(),
                editor.logged_in_user.as_str(),
                editor.client_type.as_str(),
            );

        self.store
            .save_document(&document_key, &row_key, &payload, &tenant.tenant_id)?;
        log_event_with_fields(
            Event::DocumentSaved,
            &[("document_key", document_key.as_str()), ("row_key", row_key.as_str())],
        );

        self.store.insert_audit_record(&entry)?;
        let row_id = entry.row_id.to_string();
        log_event_with_fields(
            Event::AuditWritten,
            &[("document_key", document_key.as_str()), ("row_id", row_id.as_str())],
        );

        Ok(Vec::new())
    }
}
