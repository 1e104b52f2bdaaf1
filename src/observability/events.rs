//! Observable events for infoshare
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in infoshare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Startup complete, ready to serve
    BootComplete,
    /// Shutdown initiated
    ShutdownStart,
    /// Shutdown complete
    ShutdownComplete,

    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // State backend
    /// Backend opened
    StateOpened,
    /// State log replay begins
    StateReplayBegin,
    /// State log replay complete
    StateReplayComplete,
    /// State log corruption detected (FATAL)
    StateCorruption,

    // Invocation
    /// A named function was invoked
    InvokeReceived,
    /// Invocation named an unknown function
    InvokeUnknown,

    // Records
    /// Record created
    RecordCreated,
    /// Create rejected
    RecordRejected,
    /// Record read
    RecordRead,
    /// Read found nothing
    RecordMissing,

    // Query
    /// Query selector built
    QueryBegin,
    /// Query completed
    QueryComplete,
    /// Query failed
    QueryFailed,

    // Server
    /// Serving loop entered
    Serving,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "INFOSHARE_STARTUP_BEGIN",
            Event::BootComplete => "INFOSHARE_STARTUP_COMPLETE",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::StateOpened => "STATE_OPENED",
            Event::StateReplayBegin => "STATE_REPLAY_BEGIN",
            Event::StateReplayComplete => "STATE_REPLAY_COMPLETE",
            Event::StateCorruption => "STATE_CORRUPTION",

            Event::InvokeReceived => "INVOKE_BEGIN",
            Event::InvokeUnknown => "INVOKE_UNKNOWN_FUNCTION",

            Event::RecordCreated => "RECORD_CREATED",
            Event::RecordRejected => "RECORD_REJECTED",
            Event::RecordRead => "RECORD_READ",
            Event::RecordMissing => "RECORD_MISSING",

            Event::QueryBegin => "QUERY_BEGIN",
            Event::QueryComplete => "QUERY_COMPLETE",
            Event::QueryFailed => "QUERY_FAILED",

            Event::Serving => "INFOSHARE_SERVING",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::StateCorruption)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
