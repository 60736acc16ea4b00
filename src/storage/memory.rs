//! # In-Memory Edit Store

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::observability::AuditEntry;

use super::backend::EditStore;
use super::errors::{StorageError, StorageResult};

type DocumentKey = (String, String, String);

/// Edit store kept entirely in memory, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryEditStore {
    documents: Mutex<BTreeMap<DocumentKey, String>>,
    audit: Mutex<Vec<AuditEntry>>,
    document_writes: AtomicUsize,
}

impl MemoryEditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All audit entries, in insertion order.
    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of `save_document` calls that succeeded.
    pub fn document_writes(&self) -> usize {
        self.document_writes.load(Ordering::Relaxed)
    }

    pub fn document_count(&self) -> usize {
        self.documents.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl EditStore for MemoryEditStore {
    fn save_document(
        &self,
        partition_key: &str,
        row_key: &str,
        payload: &str,
        tenant_id: &str,
    ) -> StorageResult<()> {
        if partition_key.is_empty() {
            return Err(StorageError::InvalidKey("empty partition key".into()));
        }

        let key = (tenant_id.to_string(), partition_key.to_string(), row_key.to_string());
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, payload.to_string());
        self.document_writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn insert_audit_record(&self, entry: &AuditEntry) -> StorageResult<()> {
        self.audit
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry.clone());
        Ok(())
    }

    fn load_document(&self, partition_key: &str, row_key: &str, tenant_id: &str) -> StorageResult<String> {
        let key = (tenant_id.to_string(), partition_key.to_string(), row_key.to_string());
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
            .cloned()
            .ok_or_else(|| StorageError::DocumentNotFound(format!("{}/{}", partition_key, row_key)))
    }
}
