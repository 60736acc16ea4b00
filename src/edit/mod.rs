//! Edit orchestration
//!
//! Ties collection, validation, key derivation and persistence together.
//! An edit is persisted if and only if validation reports no failures.

mod errors;
mod service;

pub use errors::{EditError, EditResult};
pub use service::{edited_row_key, EditOutcome, EditService, EditorIdentity, EDITED_ROW_PREFIX};
