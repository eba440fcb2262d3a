//! File logger handle

use crate::config::{FileLoggerConfig, InitPolicy};
use crate::error::{Error, Result};
use crate::resolver::{DirectoryResolver, DocumentsDirResolver, FixedDirResolver};
use crate::target::{TargetPath, resolve_once};
use crate::writer::{AsyncLogWriter, Command, FileSink};
use doclog_logger::{Dispatcher, Logger, PlainTextFormatter, Record, SubscriptionId};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Logger appending one line per record to a file.
///
/// `log` publishes the record to the logger's [`Dispatcher`]; the file sink
/// subscribed there formats it and queues the line for a dedicated writer
/// thread, which appends lines strictly in the order they were logged.
/// Failures never reach the caller of `log`. They are reported through
/// `tracing`, counted in [`FileLogger::failed_writes`] and returned by the
/// next [`FileLogger::flush_async`].
pub struct FileLogger {
    id: u64,
    policy: InitPolicy,
    dispatcher: Arc<Dispatcher>,
    subscription: SubscriptionId,
    commands: mpsc::UnboundedSender<Command>,
    target: TargetPath,
    failed_writes: Arc<AtomicU64>,
}

impl FileLogger {
    /// Build a logger writing into `config.directory`, or into the
    /// platform documents directory when none is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the writer thread can't
    /// be started.
    pub fn new(config: FileLoggerConfig) -> Result<Self> {
        let resolver: Arc<dyn DirectoryResolver> = match &config.directory {
            Some(dir) => Arc::new(FixedDirResolver::new(dir.clone())),
            None => Arc::new(DocumentsDirResolver),
        };

        Self::with_resolver(config, resolver)
    }

    /// Build a logger that asks `resolver` for its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the writer thread can't
    /// be started.
    pub fn with_resolver(
        config: FileLoggerConfig,
        resolver: Arc<dyn DirectoryResolver>,
    ) -> Result<Self> {
        Self::with_dispatcher(config, resolver, Arc::new(Dispatcher::new()))
    }

    /// Build a logger whose file sink subscribes to an existing dispatcher.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the writer thread can't
    /// be started.
    pub fn with_dispatcher(
        config: FileLoggerConfig,
        resolver: Arc<dyn DirectoryResolver>,
        dispatcher: Arc<Dispatcher>,
    ) -> Result<Self> {
        config.validate()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(Error::Runtime)?;

        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let failed_writes = Arc::new(AtomicU64::new(0));
        let (commands, receiver) = mpsc::unbounded_channel();
        let (target, resolution) =
            TargetPath::new(config.policy, resolver, config.file_name().to_string());

        let writer = AsyncLogWriter::new(
            target.clone(),
            failed_writes.clone(),
            config.strict_resolution,
        );
        let resolving = target.clone();

        thread::Builder::new()
            .name(config.thread_name().to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    if let Some(sender) = resolution {
                        tokio::spawn(resolve_once(resolving, sender));
                    }
                    writer.run(receiver).await;
                });
            })
            .map_err(Error::Runtime)?;

        let formatter = PlainTextFormatter::new().with_error_details(config.error_details);
        let sink = FileSink::new(Box::new(formatter), commands.clone(), failed_writes.clone());
        let subscription = dispatcher.subscribe(Arc::new(sink));

        debug!(
            "{} file logger {id} created for {}",
            config.policy.as_str(),
            config.file_name()
        );

        Ok(Self {
            id,
            policy: config.policy,
            dispatcher,
            subscription,
            commands,
            target,
            failed_writes,
        })
    }

    /// Process-unique identity of this logger
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Initialization policy this logger was built with
    pub const fn policy(&self) -> InitPolicy {
        self.policy
    }

    /// Dispatcher records are published to. Subscribe to it to receive every
    /// record logged through this logger.
    pub const fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Log file path, once an eager logger has resolved it.
    ///
    /// Lazy loggers resolve per write and always return `None`.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.target.resolved()
    }

    /// Wait for an eager logger's path resolution to finish. For a lazy
    /// logger this resolves the path right away.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Resolution`] if resolution failed, or
    /// [`Error::ChannelClosed`] if the writer stopped before finishing it.
    pub async fn wait_resolved(&self) -> Result<PathBuf> {
        self.target.wait_resolved().await
    }

    /// Wait until every record logged before this call has been written.
    ///
    /// # Errors
    ///
    /// Returns the first write failure since the previous drain, or
    /// [`Error::ChannelClosed`] if the writer is gone.
    pub async fn flush_async(&self) -> Result<()> {
        let (reply, outcome) = oneshot::channel();

        self.commands
            .send(Command::Drain(reply))
            .map_err(|_| Error::ChannelClosed)?;

        outcome.await.map_err(|_| Error::ChannelClosed)?
    }

    /// Number of records that could not be written so far
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }
}

impl Logger for FileLogger {
    fn log(&self, record: Record) {
        self.dispatcher.publish(record);
    }

    fn flush(&self) {
        self.dispatcher.flush();
    }
}

impl Drop for FileLogger {
    fn drop(&mut self) {
        // closes the queue once the sink is gone; the writer drains and exits
        self.dispatcher.unsubscribe(self.subscription);
    }
}

impl fmt::Debug for FileLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileLogger")
            .field("id", &self.id)
            .field("policy", &self.policy)
            .field("resolved_path", &self.resolved_path())
            .finish_non_exhaustive()
    }
}
