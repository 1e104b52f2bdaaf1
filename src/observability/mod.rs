//! Observability subsystem for infoshare
//!
//! - Structured logging (JSON, one line per event)
//! - Operation counters
//! - Typed lifecycle events
//!
//! Observability is read-only: it never changes the outcome of an operation.
//!
//! ```ignore
//! use infoshare::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::RecordCreated, &[("key", "420106")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{LogTarget, Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

/// Log an event at an explicit severity
pub fn log_event_at(severity: Severity, event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // verifies no panic
        log_event(Event::BootStart);
        log_event(Event::BootComplete);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ConfigLoaded, &[("data_dir", "/tmp/test")]);
        log_event_at(Severity::Warn, Event::RecordRejected, &[("key", "1")]);
    }
}
