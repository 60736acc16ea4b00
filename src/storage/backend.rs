//! # Edit Store Trait

use crate::observability::AuditEntry;

use super::errors::StorageResult;

/// Persistence collaborator for edited documents and their audit entries.
///
/// Documents are addressed by `(tenant, partition key, row key)`. The engine
/// calls `save_document` and then `insert_audit_record`; neither call is
/// retried, and a failure of the second does not undo the first.
pub trait EditStore: Send + Sync + std::fmt::Debug {
    /// Store a serialized document, replacing any previous version
    fn save_document(
        &self,
        partition_key: &str,
        row_key: &str,
        payload: &str,
        tenant_id: &str,
    ) -> StorageResult<()>;

    /// Append an audit entry
    fn insert_audit_record(&self, entry: &AuditEntry) -> StorageResult<()>;

    /// Read a stored document back
    fn load_document(&self, partition_key: &str, row_key: &str, tenant_id: &str) -> StorageResult<String>;
}
