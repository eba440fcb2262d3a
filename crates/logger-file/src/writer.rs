//! Append path and the background writer that serializes it

use crate::error::{Error, Result};
use crate::target::TargetPath;
use doclog_logger::{LogFormatter, Logger, Record};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

/// Append `line` plus a newline to the file at `path`, creating the file if
/// it does not exist. The handle is closed before returning.
///
/// # Errors
///
/// Returns [`Error::Write`] if the file cannot be opened or written.
pub async fn append(path: &Path, line: &str) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(write_err)?;

    let mut buf = String::with_capacity(line.len() + 1);
    buf.push_str(line);
    buf.push('\n');

    file.write_all(buf.as_bytes()).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;

    Ok(())
}

pub(crate) enum Command {
    Append(String),
    Drain(oneshot::Sender<Result<()>>),
}

/// Dispatcher handler: formats each record and queues the line.
pub(crate) struct FileSink {
    formatter: Box<dyn LogFormatter>,
    commands: mpsc::UnboundedSender<Command>,
    failed_writes: Arc<AtomicU64>,
}

impl FileSink {
    pub(crate) fn new(
        formatter: Box<dyn LogFormatter>,
        commands: mpsc::UnboundedSender<Command>,
        failed_writes: Arc<AtomicU64>,
    ) -> Self {
        Self {
            formatter,
            commands,
            failed_writes,
        }
    }
}

impl Logger for FileSink {
    fn log(&self, record: Record) {
        let line = self.formatter.format(&record);

        if self.commands.send(Command::Append(line)).is_err() {
            self.failed_writes.fetch_add(1, Ordering::Relaxed);
            warn!("log writer is gone, dropping record");
        }
    }

    fn flush(&self) {
        // every append is flushed by the writer as it completes
    }
}

/// Background writer draining the command queue in order.
pub(crate) struct AsyncLogWriter {
    target: TargetPath,
    failed_writes: Arc<AtomicU64>,
    first_failure: Option<Error>,
    strict_resolution: bool,
}

impl AsyncLogWriter {
    pub(crate) fn new(
        target: TargetPath,
        failed_writes: Arc<AtomicU64>,
        strict_resolution: bool,
    ) -> Self {
        Self {
            target,
            failed_writes,
            first_failure: None,
            strict_resolution,
        }
    }

    /// Process commands until every sender is dropped.
    pub(crate) async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        debug!("log writer started");

        while let Some(command) = commands.recv().await {
            match command {
                Command::Append(line) => {
                    if let Err(e) = self.write(&line).await {
                        self.record_failure(e);
                    }
                }
                Command::Drain(reply) => {
                    let outcome = self.first_failure.take().map_or(Ok(()), Err);
                    let _ = reply.send(outcome);
                }
            }
        }

        debug!("log writer stopped");
    }

    async fn write(&self, line: &str) -> Result<()> {
        let path = self.target.current().await?;
        append(&path, line).await
    }

    fn record_failure(&mut self, error: Error) {
        self.failed_writes.fetch_add(1, Ordering::Relaxed);

        if self.strict_resolution && matches!(error, Error::Unresolved) {
            error!("log write attempted before the log file path was resolved");
            // takes precedence over any softer failure queued for the next drain
            self.first_failure = Some(Error::WriteBeforeResolution);
            return;
        }

        warn!("failed to write log line: {error}");

        if self.first_failure.is_none() {
            self.first_failure = Some(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_append_creates_then_grows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");

        append(&path, "first").await.unwrap();
        append(&path, "second").await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[tokio::test]
    async fn test_append_keeps_existing_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        tokio::fs::write(&path, "written earlier\n").await.unwrap();

        append(&path, "appended").await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "written earlier\nappended\n");
    }

    #[tokio::test]
    async fn test_append_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone").join("app.log");

        let err = append(&path, "lost").await.unwrap_err();

        match err {
            Error::Write { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
