//! Rendering records into persisted lines

use crate::Record;
use std::fmt::Write;

/// Timestamp layout used in persisted lines, e.g. `2024-03-01 09:15:02.123456`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Turns a record into the text written for it.
pub trait LogFormatter: Send + Sync + 'static {
    /// Render a record. The result carries no trailing newline.
    fn format(&self, record: &Record) -> String;
}

/// `"<timestamp>: <message>"` formatter.
///
/// By default the record's error and stack trace are dropped and only the
/// timestamp and message are rendered. With error details enabled the error
/// is appended as ` (error: ...)` and the stack trace follows on indented
/// lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainTextFormatter {
    error_details: bool,
}

impl PlainTextFormatter {
    /// Create a formatter that renders timestamp and message only
    pub const fn new() -> Self {
        Self {
            error_details: false,
        }
    }

    /// Also render the record's error and stack trace
    #[must_use]
    pub const fn with_error_details(mut self, enabled: bool) -> Self {
        self.error_details = enabled;
        self
    }
}

impl LogFormatter for PlainTextFormatter {
    fn format(&self, record: &Record) -> String {
        let mut line = format!(
            "{}: {}",
            record.timestamp.format(TIMESTAMP_FORMAT),
            record.message
        );

        if !self.error_details {
            return line;
        }

        if let Some(error) = &record.error {
            let _ = write!(line, " (error: {error})");
        }
        if let Some(trace) = &record.stack_trace {
            for frame in trace.to_string().lines() {
                let _ = write!(line, "\n    {frame}");
            }
        }

        line
    }
}
