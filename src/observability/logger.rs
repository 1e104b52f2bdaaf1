//! Structured JSON logger for infoshare
//!
//! - One log line = one event
//! - `event` first, then `severity`, then fields sorted by key
//! - Synchronous, no buffering
//! - Process-wide minimum severity and output target

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Parses a lowercase config name (`trace`, `info`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "trace" => Some(Severity::Trace),
            "info" => Some(Severity::Info),
            "warn" => Some(Severity::Warn),
            "error" => Some(Severity::Error),
            "fatal" => Some(Severity::Fatal),
            _ => None,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where non-error log lines go.
///
/// ERROR and FATAL always go to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stdout = 0,
    Stderr = 1,
}

impl LogTarget {
    /// Parses a config name (`stdout` / `stderr`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "stdout" => Some(LogTarget::Stdout),
            "stderr" => Some(LogTarget::Stderr),
            _ => None,
        }
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Info as u8);
static TARGET: AtomicU8 = AtomicU8::new(LogTarget::Stderr as u8);

/// A structured logger that outputs JSON logs
pub struct Logger;

impl Logger {
    /// Sets the process-wide minimum severity and target
    pub fn configure(min_severity: Severity, target: LogTarget) {
        MIN_SEVERITY.store(min_severity as u8, Ordering::Relaxed);
        TARGET.store(target as u8, Ordering::Relaxed);
    }

    /// Returns the current minimum severity
    pub fn min_severity() -> Severity {
        Severity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Returns true if events of this severity are emitted
    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::min_severity()
    }

    /// Log an event with the given severity and fields
    ///
    /// Fields are output in deterministic order (alphabetical by key)
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }
        if severity >= Severity::Error || TARGET.load(Ordering::Relaxed) == LogTarget::Stderr as u8 {
            Self::log_to_writer(severity, event, fields, &mut io::stderr());
        } else {
            Self::log_to_writer(severity, event, fields, &mut io::stdout());
        }
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let line = Self::format_line(severity, event, fields);

        // one write per line
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    /// Renders one log line (including trailing newline)
    pub fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut output = String::with_capacity(256);

        output.push('{');

        output.push_str("\"event\":\"");
        Self::escape_json_string(&mut output, event);
        output.push('"');

        output.push_str(",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push_str(",\"");
            Self::escape_json_string(&mut output, key);
            output.push_str("\":\"");
            Self::escape_json_string(&mut output, value);
            output.push('"');
        }

        output.push('}');
        output.push('\n');
        output
    }

    fn escape_json_string(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }

    /// Log at TRACE level
    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }

    /// Log at FATAL level
    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Fatal, event, fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_severity_from_name() {
        assert_eq!(Severity::from_name("trace"), Some(Severity::Trace));
        assert_eq!(Severity::from_name("fatal"), Some(Severity::Fatal));
        assert_eq!(Severity::from_name("INFO"), None);
        assert_eq!(Severity::from_name("verbose"), None);
    }

    #[test]
    fn test_log_json_format() {
        let output = Logger::format_line(Severity::Info, "TEST_EVENT", &[]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "TEST_EVENT");
        assert_eq!(parsed["severity"], "INFO");
    }

    #[test]
    fn test_fields_sorted_by_key() {
        let output = Logger::format_line(
            Severity::Warn,
            "RECORD_REJECTED",
            &[("key", "420106"), ("code", "INFO_DUPLICATE_KEY")],
        );

        let code_pos = output.find("\"code\"").unwrap();
        let key_pos = output.find("\"key\"").unwrap();
        assert!(code_pos < key_pos);
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_escaping_keeps_line_valid_json() {
        let output = Logger::format_line(
            Severity::Error,
            "QUERY_FAILED",
            &[("cause", "bad \"selector\"\n\tat line 1")],
        );

        let parsed: serde_json::Value = serde_json::from_str(output.trim_end()).unwrap();
        assert_eq!(parsed["cause"], "bad \"selector\"\n\tat line 1");
    }

    #[test]
    fn test_log_target_from_name() {
        assert_eq!(LogTarget::from_name("stdout"), Some(LogTarget::Stdout));
        assert_eq!(LogTarget::from_name("stderr"), Some(LogTarget::Stderr));
        assert_eq!(LogTarget::from_name("file"), None);
    }
}
