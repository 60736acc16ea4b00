//! editgate - editable-field collection and validation for approval documents
//!
//! An edited approval document carries editable sections, each with the
//! user's new values and an embedded schema fragment. The engine collects
//! every section, validates every value, and only then lets the document and
//! its audit entry reach storage.

pub mod cli;
pub mod collector;
pub mod config;
pub mod edit;
pub mod observability;
pub mod schema;
pub mod storage;
pub mod tenant;
