//! Log record type

use chrono::{DateTime, Local};
use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::error::Error;
use std::sync::Arc;

/// Error value attached to a record. Shared so a record can be handed to
/// several handlers without copying the error.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// A single log call.
///
/// Records are immutable once built. Only the line rendered from a record is
/// ever persisted, never the record itself.
#[derive(Debug, Clone)]
pub struct Record {
    /// When the log call was made
    pub timestamp: DateTime<Local>,
    /// The log message
    pub message: Cow<'static, str>,
    /// Error passed along with the message, if any
    pub error: Option<SharedError>,
    /// Stack trace passed along with the message, if any
    pub stack_trace: Option<Arc<Backtrace>>,
}

impl Record {
    /// Create a record stamped with the current local time.
    #[inline]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            timestamp: Local::now(),
            message: message.into(),
            error: None,
            stack_trace: None,
        }
    }

    /// Builder-style method for attaching an error
    #[must_use]
    pub fn with_error<E>(self, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.with_shared_error(Arc::new(error))
    }

    /// Builder-style method for attaching an error that is already shared
    #[must_use]
    pub fn with_shared_error(mut self, error: SharedError) -> Self {
        self.error = Some(error);
        self
    }

    /// Builder-style method for attaching a stack trace
    #[must_use]
    pub fn with_stack_trace(mut self, trace: Backtrace) -> Self {
        self.stack_trace = Some(Arc::new(trace));
        self
    }

    /// Builder-style method for overriding the timestamp
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_new_record_has_no_attachments() {
        let record = Record::new("hello");

        assert_eq!(record.message, "hello");
        assert!(record.error.is_none());
        assert!(record.stack_trace.is_none());
    }

    #[test]
    fn test_clone_shares_error() {
        let record = Record::new("disk trouble")
            .with_error(io::Error::other("disk full"))
            .with_stack_trace(Backtrace::disabled());
        let copy = record.clone();

        let (Some(a), Some(b)) = (&record.error, &copy.error) else {
            panic!("error missing after clone");
        };
        assert!(Arc::ptr_eq(a, b));
        assert_eq!(b.to_string(), "disk full");
        assert!(copy.stack_trace.is_some());
    }
}
