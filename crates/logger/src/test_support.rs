//! Test support utilities
//!
//! This module provides a handler that captures dispatched records in memory.
//! It's only available when the `test-support` feature is enabled.

use crate::{LogFormatter, Logger, PlainTextFormatter, Record};
use parking_lot::Mutex;
use std::sync::Arc;

/// A logger that captures all records in memory for testing
#[derive(Clone, Default)]
pub struct CaptureLogger {
    records: Arc<Mutex<Vec<Record>>>,
    formatter: PlainTextFormatter,
}

impl CaptureLogger {
    /// Create a new capture logger
    pub fn new() -> Self {
        Self::default()
    }

    /// Render captured records with error details included
    #[must_use]
    pub fn with_error_details(mut self) -> Self {
        self.formatter = self.formatter.with_error_details(true);
        self
    }

    /// All captured records, oldest first
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Captured messages, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| record.message.to_string())
            .collect()
    }

    /// Captured records rendered the way they would be persisted
    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| self.formatter.format(record))
            .collect()
    }

    /// Clear captured records
    pub fn clear(&self) {
        self.records.lock().clear();
    }

    /// Check if any captured line contains a specific string
    pub fn contains(&self, text: &str) -> bool {
        self.lines().iter().any(|line| line.contains(text))
    }
}

impl Logger for CaptureLogger {
    fn log(&self, record: Record) {
        self.records.lock().push(record);
    }

    fn flush(&self) {
        // No-op for in-memory logger
    }
}
