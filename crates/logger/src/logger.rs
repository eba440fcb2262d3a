//! Core logger trait

use crate::Record;
use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::error::Error;

/// Core logger trait.
///
/// `log` is fire-and-forget: implementations must return without waiting for
/// the record to be persisted and must not report failures to the caller.
pub trait Logger: Send + Sync + 'static {
    /// Log a record
    fn log(&self, record: Record);

    /// Flush any buffered logs
    fn flush(&self);
}

/// Extension trait for convenient logging methods
pub trait LoggerExt: Logger {
    /// Log a plain message
    #[inline]
    fn message(&self, msg: impl Into<Cow<'static, str>>) {
        self.log(Record::new(msg));
    }

    /// Log a message together with the error that caused it
    #[inline]
    fn message_with_error<E>(&self, msg: impl Into<Cow<'static, str>>, error: E)
    where
        E: Error + Send + Sync + 'static,
    {
        self.log(Record::new(msg).with_error(error));
    }

    /// Log a message with a stack trace and no error
    #[inline]
    fn message_with_stack_trace(&self, msg: impl Into<Cow<'static, str>>, trace: Backtrace) {
        self.log(Record::new(msg).with_stack_trace(trace));
    }

    /// Log a message with an error and the stack trace captured alongside it
    #[inline]
    fn message_with_trace<E>(&self, msg: impl Into<Cow<'static, str>>, error: E, trace: Backtrace)
    where
        E: Error + Send + Sync + 'static,
    {
        self.log(Record::new(msg).with_error(error).with_stack_trace(trace));
    }
}

// Implement for all loggers
impl<T: Logger + ?Sized> LoggerExt for T {}
