//! Schema fragment definitions
//!
//! A fragment is the per-field subset of JSON-Schema keywords the engine
//! understands: `type`, `required`, `minLength`, `maxLength`, `pattern`,
//! `minimum`, `maximum`, `exclusiveMaximum`, `multipleOf`. Every other keyword
//! is ignored. Only `type` is mandatory.

use regex::Regex;
use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult};

/// Declared data type of an editable field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
    /// Any other type name; validated as a no-op
    Other(String),
}

impl DataType {
    /// Maps a schema type name. Names are matched exactly, as JSON Schema does.
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => DataType::String,
            "integer" => DataType::Integer,
            "number" => DataType::Number,
            "boolean" => DataType::Boolean,
            "object" => DataType::Object,
            "array" => DataType::Array,
            other => DataType::Other(other.to_string()),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            DataType::String => "string",
            DataType::Integer => "integer",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::Object => "object",
            DataType::Array => "array",
            DataType::Other(name) => name,
        }
    }
}

/// A compiled `pattern` keyword.
///
/// The source text is kept for messages; the regex is anchored at both ends so
/// the whole value has to match.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    source: String,
    regex: Regex,
}

impl FieldPattern {
    pub fn compile(field: &str, source: &str) -> SchemaResult<Self> {
        let regex = Regex::new(&format!("^(?:{})$", source))
            .map_err(|e| SchemaError::invalid_pattern(field, source, e))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_full_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Constraints attached to one editable field
#[derive(Debug, Clone)]
pub struct SchemaFragment {
    pub data_type: DataType,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<FieldPattern>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_maximum: bool,
    pub multiple_of: Option<f64>,
}

impl SchemaFragment {
    /// A fragment with only a type and no constraints.
    pub fn of_type(data_type: DataType) -> Self {
        Self {
            data_type,
            required: false,
            min_length: None,
            max_length: None,
            pattern: None,
            minimum: None,
            maximum: None,
            exclusive_maximum: false,
            multiple_of: None,
        }
    }

    /// Parses a fragment node.
    ///
    /// Numeric keywords accept numbers or numeric strings; boolean keywords
    /// accept booleans or "true"/"false". A null keyword counts as absent.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the node is not an object, `type` is missing,
    /// a keyword has the wrong shape, or `pattern` does not compile.
    pub fn from_value(field: &str, node: &Value) -> SchemaResult<Self> {
        let obj = node.as_object().ok_or_else(|| {
            SchemaError::invalid_keyword(field, "properties", "fragment must be an object")
        })?;

        let data_type = match obj.get("type") {
            Some(Value::String(name)) if !name.is_empty() => DataType::from_name(name),
            _ => return Err(SchemaError::type_missing(field)),
        };

        let pattern = match obj.get("pattern") {
            None | Some(Value::Null) => None,
            Some(Value::String(source)) if source.is_empty() => None,
            Some(Value::String(source)) => Some(FieldPattern::compile(field, source)?),
            Some(_) => {
                return Err(SchemaError::invalid_keyword(field, "pattern", "expected a string"));
            }
        };

        let multiple_of = read_number(field, obj, "multipleOf")?;
        if let Some(m) = multiple_of {
            if m <= 0.0 {
                return Err(SchemaError::invalid_keyword(
                    field,
                    "multipleOf",
                    "must be greater than zero",
                ));
            }
        }

        Ok(Self {
            data_type,
            required: read_bool(field, obj, "required")?.unwrap_or(false),
            min_length: read_length(field, obj, "minLength")?,
            max_length: read_length(field, obj, "maxLength")?,
            pattern,
            minimum: read_number(field, obj, "minimum")?,
            maximum: read_number(field, obj, "maximum")?,
            exclusive_maximum: read_bool(field, obj, "exclusiveMaximum")?.unwrap_or(false),
            multiple_of,
        })
    }
}

fn read_number(field: &str, obj: &Map<String, Value>, keyword: &str) -> SchemaResult<Option<f64>> {
    let parsed = match obj.get(keyword) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(SchemaError::invalid_keyword(field, keyword, "expected a finite number")),
    }
}

fn read_length(field: &str, obj: &Map<String, Value>, keyword: &str) -> SchemaResult<Option<usize>> {
    match read_number(field, obj, keyword)? {
        None => Ok(None),
        Some(n) if n >= 0.0 && n.fract() == 0.0 => Ok(Some(n as usize)),
        Some(_) => Err(SchemaError::invalid_keyword(
            field,
            keyword,
            "expected a non-negative integer",
        )),
    }
}

fn read_bool(field: &str, obj: &Map<String, Value>, keyword: &str) -> SchemaResult<Option<bool>> {
    match obj.get(keyword) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(_) => Err(SchemaError::invalid_keyword(field, keyword, "expected a boolean")),
    }
}
