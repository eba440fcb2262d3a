//! Core logging capability for doclog.
//!
//! A [`Logger`] accepts [`Record`]s and never reports failures back to the
//! caller. A [`Dispatcher`] fans each published record out to its handlers in
//! registration order, and a [`LogFormatter`] renders a record into the line
//! that ends up on disk.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod dispatcher;
mod format;
mod logger;
mod record;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use dispatcher::{Dispatcher, SubscriptionId};
pub use format::{LogFormatter, PlainTextFormatter, TIMESTAMP_FORMAT};
pub use logger::{Logger, LoggerExt};
pub use record::{Record, SharedError};

/// Logger that discards everything it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline(always)]
    fn log(&self, _record: Record) {}

    #[inline(always)]
    fn flush(&self) {}
}
