//! Schema fragments and constraint validation
//!
//! Every editable field carries its own fragment inside the edited document.
//! Validation runs over the full set of collected fields before any write.
//!
//! # Principles
//!
//! - A bad value is a failure message, never an error
//! - A missing or malformed fragment is a `SchemaError` and aborts the edit
//! - All failures are reported, in record and field order
//! - Validation is deterministic and does not touch its input

mod errors;
mod failure;
mod resolver;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use failure::ValidationFailure;
pub use resolver::{resolve_fragment, schema_key_for, SCHEMA_KEY_PREFIX};
pub use types::{DataType, FieldPattern, SchemaFragment};
pub use validator::{validate, validate_field, ConstraintValidator};
