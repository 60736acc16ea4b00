//! Recursive editable-section collection
//!
//! Traversal rules:
//! - An object carrying the marker key yields one record per section
//! - The sibling schema node is attached to every section it accompanies
//! - An array is walked element by element, in order
//! - A non-empty children property is walked recursively
//! - The line-items collection is a second, independent root
//!
//! Collection never fails and never mutates its input. A section without a
//! schema still yields a record; the validator decides what that means.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::EditableFieldRecord;

/// Key of the section identifier inside an editable section.
pub const SECTION_ID_KEY: &str = "id";

/// Key of the field mapping inside an editable section.
pub const SECTION_FIELDS_KEY: &str = "fields";

/// Property names the collector looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Marks a node as carrying an editable section (default: "Editable")
    #[serde(default = "default_marker_key")]
    pub marker_key: String,

    /// Nested nodes to recurse into (default: "Children")
    #[serde(default = "default_children_key")]
    pub children_key: String,

    /// Top-level collection scanned as a second root (default: "LineItems")
    #[serde(default = "default_line_items_key")]
    pub line_items_key: String,

    /// Schema node accompanying a section (default: "jsonSchema")
    #[serde(default = "default_schema_key")]
    pub schema_key: String,
}

fn default_marker_key() -> String {
    "Editable".to_string()
}

fn default_children_key() -> String {
    "Children".to_string()
}

fn default_line_items_key() -> String {
    "LineItems".to_string()
}

fn default_schema_key() -> String {
    "jsonSchema".to_string()
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            marker_key: default_marker_key(),
            children_key: default_children_key(),
            line_items_key: default_line_items_key(),
            schema_key: default_schema_key(),
        }
    }
}

/// Walks document trees and gathers editable sections.
pub struct FieldCollector<'a> {
    config: &'a CollectorConfig,
}

impl<'a> FieldCollector<'a> {
    pub fn new(config: &'a CollectorConfig) -> Self {
        Self { config }
    }

    /// Collects from the whole document: the top-level pass first, then the
    /// line-items collection, each in document order.
    ///
    /// When the line-items key is also the children key, the top-level pass
    /// has already walked the line items and the second pass is skipped.
    pub fn collect_document(&self, document: &Value) -> Vec<EditableFieldRecord> {
        let mut records = self.collect(document);

        if self.config.line_items_key == self.config.children_key {
            return records;
        }

        if let Some(line_items) = document.get(&self.config.line_items_key) {
            records.extend(self.collect(line_items));
        }

        records
    }

    /// Collects from a single root.
    pub fn collect(&self, node: &Value) -> Vec<EditableFieldRecord> {
        match node {
            Value::Object(obj) => {
                let mut records = Vec::new();

                if let Some(section) = obj.get(&self.config.marker_key) {
                    let schema = obj.get(&self.config.schema_key);
                    records.extend(self.sections(section, schema));
                }

                if let Some(children) = obj.get(&self.config.children_key) {
                    if !is_empty_node(children) {
                        records.extend(self.collect(children));
                    }
                }

                records
            }
            Value::Array(items) => items.iter().flat_map(|item| self.collect(item)).collect(),
            _ => Vec::new(),
        }
    }

    /// A marker may hold one section or a list of them.
    fn sections(&self, marker: &Value, sibling_schema: Option<&Value>) -> Vec<EditableFieldRecord> {
        match marker {
            Value::Array(items) => items
                .iter()
                .filter_map(|section| self.normalize(section, sibling_schema))
                .collect(),
            other => self.normalize(other, sibling_schema).into_iter().collect(),
        }
    }

    fn normalize(&self, section: &Value, sibling_schema: Option<&Value>) -> Option<EditableFieldRecord> {
        let section = section.as_object()?;

        let id = match section.get(SECTION_ID_KEY) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        let fields = section
            .get(SECTION_FIELDS_KEY)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let schema = sibling_schema
            .or_else(|| section.get(&self.config.schema_key))
            .and_then(Value::as_object)
            .cloned();

        Some(EditableFieldRecord::new(id, fields, schema))
    }
}

/// Collects with the default schema key.
///
/// Only the top-level pass runs; use [`FieldCollector::collect_document`] to
/// include the line-items collection.
pub fn collect(document: &Value, marker_key: &str, children_key: &str) -> Vec<EditableFieldRecord> {
    let config = CollectorConfig {
        marker_key: marker_key.to_string(),
        children_key: children_key.to_string(),
        ..CollectorConfig::default()
    };
    FieldCollector::new(&config).collect(document)
}

fn is_empty_node(node: &Value) -> bool {
    match node {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(obj) => obj.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
