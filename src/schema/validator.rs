//! Constraint validation of collected editable fields
//!
//! Per field, in order:
//! 1. Resolve the fragment (`DynamicSectionEditable<field>.properties.<field>`)
//! 2. Required check: absent value on a required field fails
//! 3. Absent optional values skip every other rule
//! 4. Type dispatch: string, integer, number, boolean; object, array and
//!    unknown types pass through
//!
//! Validation is total over values: a bad value only ever produces a failure
//! message. Every rule runs, so the caller gets the complete list at once.
//! Only a missing or malformed fragment stops validation, as a `SchemaError`.

use crate::collector::EditableFieldRecord;

use super::errors::SchemaResult;
use super::failure::ValidationFailure;
use super::resolver::resolve_fragment;
use super::types::{DataType, SchemaFragment};

/// Tolerance for `multipleOf`, relative to the quotient.
const MULTIPLE_OF_EPSILON: f64 = 1e-9;

/// Validates collected records against their attached fragments.
///
/// Stateless; one validator can serve any number of edits concurrently.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstraintValidator;

impl ConstraintValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates every field of every record.
    ///
    /// Returns all failures in record order, then field order. An empty list
    /// means the edit may be persisted.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if any field's fragment is missing or malformed.
    pub fn validate(&self, records: &[EditableFieldRecord]) -> SchemaResult<Vec<ValidationFailure>> {
        let mut failures = Vec::new();
        for record in records {
            failures.extend(self.validate_record(record)?);
        }
        Ok(failures)
    }

    /// Validates a single record.
    pub fn validate_record(&self, record: &EditableFieldRecord) -> SchemaResult<Vec<ValidationFailure>> {
        let mut failures = Vec::new();

        for (field, value) in record.fields() {
            let node = resolve_fragment(record.schema(), field)?;
            let fragment = SchemaFragment::from_value(field, node)?;
            let new_value = value.new_value();

            failures.extend(
                validate_field(field, new_value.as_deref(), &fragment)
                    .into_iter()
                    .map(|message| ValidationFailure::new(record.id(), field, message)),
            );
        }

        Ok(failures)
    }
}

/// Validates records with a default validator.
pub fn validate(records: &[EditableFieldRecord]) -> SchemaResult<Vec<ValidationFailure>> {
    ConstraintValidator::new().validate(records)
}

/// Checks one value against one fragment and returns the failure messages.
///
/// `value` is `None` when the editor left the field empty.
pub fn validate_field(field: &str, value: Option<&str>, fragment: &SchemaFragment) -> Vec<String> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            if fragment.required {
                return vec![format!("{} field must have value", field)];
            }
            return Vec::new();
        }
    };

    match fragment.data_type {
        DataType::String => check_string(field, value, fragment),
        DataType::Integer => check_integer(field, value),
        DataType::Number => check_number(field, value, fragment),
        DataType::Boolean => check_boolean(field, value),
        DataType::Object | DataType::Array | DataType::Other(_) => Vec::new(),
    }
}

fn check_string(field: &str, value: &str, fragment: &SchemaFragment) -> Vec<String> {
    let mut failures = Vec::new();

    if let (Some(min), Some(max)) = (fragment.min_length, fragment.max_length) {
        let len = value.chars().count();
        if len < min || len > max {
            failures.push(format!(
                "{} field length must be between {} and {} characters.",
                field, min, max
            ));
        }
    }

    if let Some(pattern) = &fragment.pattern {
        if !pattern.is_full_match(value) {
            failures.push(format!(
                "{} field value must match the pattern {}.",
                field,
                pattern.source()
            ));
        }
    }

    failures
}

fn check_integer(field: &str, value: &str) -> Vec<String> {
    match value.trim().parse::<i64>() {
        Ok(_) => Vec::new(),
        Err(_) => vec![format!("{} field value must be an integer.", field)],
    }
}

fn check_number(field: &str, value: &str, fragment: &SchemaFragment) -> Vec<String> {
    let number = match parse_number(value) {
        Some(n) => n,
        None => return vec![format!("{} field value must be a number.", field)],
    };

    let mut failures = Vec::new();

    if let (Some(min), Some(max)) = (fragment.minimum, fragment.maximum) {
        let above_max = if fragment.exclusive_maximum {
            number >= max
        } else {
            number > max
        };

        if number < min || above_max {
            let bound = if fragment.exclusive_maximum {
                "maximum exclusive"
            } else {
                "inclusive"
            };
            failures.push(format!(
                "{} field value must be between {} and {} ({}).",
                field, min, max, bound
            ));
        }
    }

    if let Some(multiple) = fragment.multiple_of {
        if !is_multiple_of(number, multiple) {
            failures.push(format!(
                "{} field value must be a multiple of {}.",
                field, multiple
            ));
        }
    }

    failures
}

fn check_boolean(field: &str, value: &str) -> Vec<String> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
        Vec::new()
    } else {
        vec![format!("{} field value must be a bool value.", field)]
    }
}

/// Parses a finite floating-point number. "NaN" and "inf" are rejected.
fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_multiple_of(value: f64, multiple: f64) -> bool {
    let quotient = value / multiple;
    (quotient - quotient.round()).abs() <= MULTIPLE_OF_EPSILON * quotient.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::FieldPattern;

    fn string_fragment(min: Option<usize>, max: Option<usize>, pattern: Option<&str>) -> SchemaFragment {
        let mut fragment = SchemaFragment::of_type(DataType::String);
        fragment.min_length = min;
        fragment.max_length = max;
        fragment.pattern = pattern.map(|p| FieldPattern::compile("Code", p).unwrap());
        fragment
    }

    fn number_fragment(min: f64, max: f64, exclusive: bool) -> SchemaFragment {
        let mut fragment = SchemaFragment::of_type(DataType::Number);
        fragment.minimum = Some(min);
        fragment.maximum = Some(max);
        fragment.exclusive_maximum = exclusive;
        fragment
    }

    #[test]
    fn test_required_absent_fails_for_every_type() {
        for data_type in [
            DataType::String,
            DataType::Integer,
            DataType::Number,
            DataType::Boolean,
            DataType::Object,
            DataType::Array,
            DataType::Other("date".into()),
        ] {
            let mut fragment = SchemaFragment::of_type(data_type);
            fragment.required = true;

            assert_eq!(
                validate_field("Title", None, &fragment),
                vec!["Title field must have value".to_string()]
            );
            assert_eq!(validate_field("Title", Some(""), &fragment).len(), 1);
        }
    }

    #[test]
    fn test_optional_absent_skips_type_rules() {
        let fragment = SchemaFragment::of_type(DataType::Integer);
        assert!(validate_field("Qty", None, &fragment).is_empty());
    }

    #[test]
    fn test_string_length_bounds_inclusive() {
        let fragment = string_fragment(Some(3), Some(5), None);

        for ok in ["abc", "abcd", "abcde"] {
            assert!(validate_field("Name", Some(ok), &fragment).is_empty(), "{}", ok);
        }
        for bad in ["ab", "abcdef"] {
            assert_eq!(
                validate_field("Name", Some(bad), &fragment),
                vec!["Name field length must be between 3 and 5 characters.".to_string()]
            );
        }
    }

    #[test]
    fn test_string_length_counts_characters() {
        let fragment = string_fragment(Some(1), Some(3), None);
        assert!(validate_field("Name", Some("äöü"), &fragment).is_empty());
    }

    #[test]
    fn test_single_length_bound_is_not_checked() {
        let fragment = string_fragment(Some(3), None, None);
        assert!(validate_field("Name", Some("a"), &fragment).is_empty());
    }

    #[test]
    fn test_pattern_full_match() {
        let fragment = string_fragment(None, None, Some(r"^[A-Z]{2}\d{4}$"));
        assert!(validate_field("Code", Some("AB1234"), &fragment).is_empty());

        let failures = validate_field("Code", Some("ab1234"), &fragment);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains(r"^[A-Z]{2}\d{4}$"));
    }

    #[test]
    fn test_pattern_without_anchors_must_match_whole_value() {
        let fragment = string_fragment(None, None, Some(r"\d+"));
        assert!(validate_field("Code", Some("123"), &fragment).is_empty());
        assert_eq!(validate_field("Code", Some("12a"), &fragment).len(), 1);
    }

    #[test]
    fn test_length_and_pattern_both_reported() {
        let fragment = string_fragment(Some(3), Some(5), Some("[0-9]+"));
        assert_eq!(validate_field("Code", Some("ab"), &fragment).len(), 2);
    }

    #[test]
    fn test_integer() {
        let fragment = SchemaFragment::of_type(DataType::Integer);
        for ok in ["0", "-12", "+7", " 42 "] {
            assert!(validate_field("Qty", Some(ok), &fragment).is_empty(), "{}", ok);
        }
        for bad in ["1.5", "abc", "1e3"] {
            assert_eq!(
                validate_field("Qty", Some(bad), &fragment),
                vec!["Qty field value must be an integer.".to_string()]
            );
        }
    }

    #[test]
    fn test_number_parse() {
        let fragment = SchemaFragment::of_type(DataType::Number);
        for ok in ["1", "-0.5", "1e3"] {
            assert!(validate_field("Rate", Some(ok), &fragment).is_empty(), "{}", ok);
        }
        for bad in ["one", "NaN", "inf"] {
            assert_eq!(
                validate_field("Rate", Some(bad), &fragment),
                vec!["Rate field value must be a number.".to_string()]
            );
        }
    }

    #[test]
    fn test_number_exclusive_maximum() {
        let fragment = number_fragment(0.0, 10.0, true);

        assert!(validate_field("Rate", Some("9.999"), &fragment).is_empty());
        assert!(validate_field("Rate", Some("0"), &fragment).is_empty());

        let failures = validate_field("Rate", Some("10"), &fragment);
        assert_eq!(
            failures,
            vec!["Rate field value must be between 0 and 10 (maximum exclusive).".to_string()]
        );
        assert_eq!(validate_field("Rate", Some("-0.01"), &fragment).len(), 1);
    }

    #[test]
    fn test_number_inclusive_maximum() {
        let fragment = number_fragment(0.0, 100.0, false);

        assert!(validate_field("Amount", Some("100"), &fragment).is_empty());
        assert_eq!(
            validate_field("Amount", Some("150"), &fragment),
            vec!["Amount field value must be between 0 and 100 (inclusive).".to_string()]
        );
    }

    #[test]
    fn test_multiple_of() {
        let mut fragment = SchemaFragment::of_type(DataType::Number);
        fragment.multiple_of = Some(0.1);

        assert!(validate_field("Step", Some("0.3"), &fragment).is_empty());
        assert!(validate_field("Step", Some("-2.5"), &fragment).is_empty());
        assert_eq!(
            validate_field("Step", Some("0.35"), &fragment),
            vec!["Step field value must be a multiple of 0.1.".to_string()]
        );
    }

    #[test]
    fn test_range_and_multiple_both_reported() {
        let mut fragment = number_fragment(0.0, 10.0, false);
        fragment.multiple_of = Some(2.0);
        assert_eq!(validate_field("Even", Some("11"), &fragment).len(), 2);
    }

    #[test]
    fn test_boolean() {
        let fragment = SchemaFragment::of_type(DataType::Boolean);
        for ok in ["true", "False", "TRUE"] {
            assert!(validate_field("Flag", Some(ok), &fragment).is_empty(), "{}", ok);
        }
        assert_eq!(
            validate_field("Flag", Some("yes"), &fragment),
            vec!["Flag field value must be a bool value.".to_string()]
        );
    }

    #[test]
    fn test_pass_through_types() {
        for data_type in [DataType::Object, DataType::Array, DataType::Other("date".into())] {
            let fragment = SchemaFragment::of_type(data_type);
            assert!(validate_field("Blob", Some("anything"), &fragment).is_empty());
        }
    }
}
