//! Editable-section collection
//!
//! Walks an edited document and returns every editable section it carries,
//! in document order, as [`EditableFieldRecord`]s.

#[allow(clippy::module_inception)]
mod collector;
mod record;

pub use collector::{collect, CollectorConfig, FieldCollector, SECTION_FIELDS_KEY, SECTION_ID_KEY};
pub use record::{AuditedSection, EditableFieldRecord, FieldValue, NEW_VALUE_KEY};
