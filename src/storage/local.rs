//! # Local Filesystem Edit Store
//!
//! Layout under the root directory:
//!
//! ```text
//! documents/<tenant>/<partition>/<row>.json   checksummed envelope
//! audit.log                                   one JSON entry per line
//! ```
//!
//! Key components are percent-encoded, so any key maps to a single path
//! segment. Document writes go to a temporary file that is synced and then
//! renamed over the target. Audit appends are flushed and synced before
//! returning. Every document read verifies the CRC32 checksum.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::observability::AuditEntry;

use super::backend::EditStore;
use super::errors::{StorageError, StorageResult};

const DOCUMENTS_DIR: &str = "documents";
const AUDIT_LOG_FILE: &str = "audit.log";

/// On-disk form of a stored document
#[derive(Debug, Serialize, Deserialize)]
struct DocumentEnvelope {
    checksum: u32,
    payload: String,
}

/// Filesystem-backed edit store
#[derive(Debug)]
pub struct FileEditStore {
    root: PathBuf,
    audit: Mutex<File>,
}

impl FileEditStore {
    /// Open or create a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(DOCUMENTS_DIR))?;

        let audit = OpenOptions::new()
            .create(true)
            .append(true)
            .open(root.join(AUDIT_LOG_FILE))?;

        Ok(Self {
            root,
            audit: Mutex::new(audit),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn audit_log_path(&self) -> PathBuf {
        self.root.join(AUDIT_LOG_FILE)
    }

    /// Reads every audit entry written so far, oldest first.
    pub fn read_audit_log(&self) -> StorageResult<Vec<AuditEntry>> {
        let file = File::open(self.audit_log_path())?;
        let mut entries = Vec::new();

        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(serde_json::from_str(&line)?);
        }

        Ok(entries)
    }

    fn document_path(&self, partition_key: &str, row_key: &str, tenant_id: &str) -> StorageResult<PathBuf> {
        if partition_key.is_empty() {
            return Err(StorageError::InvalidKey("empty partition key".into()));
        }
        if row_key.is_empty() {
            return Err(StorageError::InvalidKey("empty row key".into()));
        }

        Ok(self
            .root
            .join(DOCUMENTS_DIR)
            .join(encode_component(tenant_id))
            .join(encode_component(partition_key))
            .join(format!("{}.json", encode_component(row_key))))
    }
}

impl EditStore for FileEditStore {
    fn save_document(
        &self,
        partition_key: &str,
        row_key: &str,
        payload: &str,
        tenant_id: &str,
    ) -> StorageResult<()> {
        let path = self.document_path(partition_key, row_key, tenant_id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let envelope = DocumentEnvelope {
            checksum: crc32fast::hash(payload.as_bytes()),
            payload: payload.to_string(),
        };
        let bytes = serde_json::to_vec(&envelope)?;

        let tmp_path = path.with_extension("json.tmp");
        let written = write_synced(&tmp_path, &bytes).and_then(|_| fs::rename(&tmp_path, &path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        Ok(())
    }

    fn insert_audit_record(&self, entry: &AuditEntry) -> StorageResult<()> {
        let line = entry.to_json()?;
        let mut file = self.audit.lock().unwrap_or_else(|e| e.into_inner());

        // A failed append is cut back off so no partial line survives it.
        let len = file.metadata()?.len();
        if let Err(e) = append_line(&mut *file, &line) {
            let _ = file.set_len(len);
            return Err(e.into());
        }
        file.sync_all()?;
        Ok(())
    }

    fn load_document(&self, partition_key: &str, row_key: &str, tenant_id: &str) -> StorageResult<String> {
        let path = self.document_path(partition_key, row_key, tenant_id)?;

        let bytes = fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::DocumentNotFound(format!("{}/{}", partition_key, row_key))
            } else {
                StorageError::IoError(e.to_string())
            }
        })?;

        let envelope: DocumentEnvelope = serde_json::from_slice(&bytes)?;
        if crc32fast::hash(envelope.payload.as_bytes()) != envelope.checksum {
            return Err(StorageError::ChecksumMismatch(path.display().to_string()));
        }

        Ok(envelope.payload)
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Writes one audit line with a single `write_all`, then flushes.
///
/// Nothing is buffered between calls, so a failed append leaves no bytes
/// behind for the next one.
fn append_line<W: Write>(writer: &mut W, line: &str) -> io::Result<()> {
    let mut bytes = Vec::with_capacity(line.len() + 1);
    bytes.extend_from_slice(line.as_bytes());
    bytes.push(b'\n');
    writer.write_all(&bytes)?;
    writer.flush()
}

/// Percent-encodes everything outside `[A-Za-z0-9_-]`.
///
/// Dots are encoded too, so no component can be `.` or `..`.
fn encode_component(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    if encoded.is_empty() {
        encoded.push('_');
    }
    encoded
}
