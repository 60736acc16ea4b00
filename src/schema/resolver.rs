//! Schema fragment lookup by field name
//!
//! The schema node attached to a section holds one entry per editable field,
//! keyed by a synthesized name:
//!
//! ```text
//! jsonSchema
//! └── "DynamicSectionEditable" + <field>
//!     └── properties
//!         └── <field>   <- the fragment
//! ```

use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult};

/// Prefix of every per-field schema entry.
pub const SCHEMA_KEY_PREFIX: &str = "DynamicSectionEditable";

/// Returns the schema entry name for a field.
pub fn schema_key_for(field: &str) -> String {
    format!("{}{}", SCHEMA_KEY_PREFIX, field)
}

/// Finds the fragment node for `field` in a section's schema.
///
/// # Errors
///
/// Returns `EDIT_SCHEMA_UNRESOLVED` when the section has no schema, or any
/// step of the path is missing.
pub fn resolve_fragment<'a>(
    schema: Option<&'a Map<String, Value>>,
    field: &str,
) -> SchemaResult<&'a Value> {
    let key = schema_key_for(field);

    schema
        .and_then(|schema| schema.get(&key))
        .and_then(|entry| entry.get("properties"))
        .and_then(|properties| properties.get(field))
        .ok_or_else(|| SchemaError::unresolved(field, &key))
}
