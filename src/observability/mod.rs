//! Observability for the edit pipeline
//!
//! - Structured JSON logging on stderr
//! - Typed lifecycle events
//! - Counters per edit service
//! - Audit entries for successful edits
//!
//! Observability is read-only: logging never fails an edit and never changes
//! its outcome.
//!
//! ```ignore
//! use editgate::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::EditRejected, &[("failures", "2")]);
//! ```

pub mod audit;
mod events;
mod logger;
mod metrics;
mod scope;

pub use audit::{editable_field_json, AuditEntry};
pub use events::Event;
pub use logger::{Logger, Severity};
#[cfg(test)]
pub(crate) use logger::take_captured;
pub use metrics::{EditMetrics, MetricsSnapshot};
pub use scope::ObservationScope;

fn severity_of(event: Event) -> Severity {
    if event.is_error() {
        Severity::Error
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_of(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_of(event), event.as_str(), fields);
}
