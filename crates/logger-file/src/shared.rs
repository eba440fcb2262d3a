//! Process-wide eager and lazy instances
//!
//! The eager instance is installed explicitly from the host's startup path
//! with [`init_eager`] and starts resolving its file right away. The lazy
//! instance is created by the first call to [`lazy`]. Either way every caller
//! in the process gets the same `Arc`.

use crate::config::{FileLoggerConfig, InitPolicy};
use crate::error::{Error, Result};
use crate::logger::FileLogger;
use crate::resolver::DirectoryResolver;
use parking_lot::{Mutex, const_mutex};
use std::sync::{Arc, OnceLock};

static EAGER: OnceLock<Arc<FileLogger>> = OnceLock::new();
static EAGER_INIT: Mutex<()> = const_mutex(());

static LAZY: OnceLock<Arc<FileLogger>> = OnceLock::new();
static LAZY_SETUP: Mutex<Option<Setup>> = const_mutex(None);

#[derive(Clone, Default)]
struct Setup {
    config: FileLoggerConfig,
    resolver: Option<Arc<dyn DirectoryResolver>>,
}

impl Setup {
    fn build(self, policy: InitPolicy) -> Result<FileLogger> {
        let config = FileLoggerConfig {
            policy,
            ..self.config
        };

        match self.resolver {
            Some(resolver) => FileLogger::with_resolver(config, resolver),
            None => FileLogger::new(config),
        }
    }
}

/// Install the process-wide eager logger. Its path resolution starts
/// immediately and is not awaited.
///
/// # Errors
///
/// Returns [`Error::AlreadyInitialized`] on a second call, or any error from
/// building the logger.
pub fn init_eager(config: FileLoggerConfig) -> Result<Arc<FileLogger>> {
    install_eager(Setup {
        config,
        resolver: None,
    })
}

/// Like [`init_eager`], with an explicit directory resolver.
///
/// # Errors
///
/// Returns [`Error::AlreadyInitialized`] on a second call, or any error from
/// building the logger.
pub fn init_eager_with_resolver(
    config: FileLoggerConfig,
    resolver: Arc<dyn DirectoryResolver>,
) -> Result<Arc<FileLogger>> {
    install_eager(Setup {
        config,
        resolver: Some(resolver),
    })
}

/// The process-wide eager logger, if [`init_eager`] has run.
pub fn eager() -> Option<Arc<FileLogger>> {
    EAGER.get().cloned()
}

fn install_eager(setup: Setup) -> Result<Arc<FileLogger>> {
    let _guard = EAGER_INIT.lock();

    if EAGER.get().is_some() {
        return Err(Error::AlreadyInitialized("eager"));
    }

    let logger = Arc::new(setup.build(InitPolicy::Eager)?);
    EAGER
        .set(logger.clone())
        .map_err(|_| Error::AlreadyInitialized("eager"))?;

    Ok(logger)
}

/// Set the config the lazy logger is built with on first access.
///
/// # Errors
///
/// Returns [`Error::AlreadyInitialized`] if the lazy logger already exists.
pub fn configure_lazy(config: FileLoggerConfig) -> Result<()> {
    configure(Setup {
        config,
        resolver: None,
    })
}

/// Like [`configure_lazy`], with an explicit directory resolver.
///
/// # Errors
///
/// Returns [`Error::AlreadyInitialized`] if the lazy logger already exists.
pub fn configure_lazy_with_resolver(
    config: FileLoggerConfig,
    resolver: Arc<dyn DirectoryResolver>,
) -> Result<()> {
    configure(Setup {
        config,
        resolver: Some(resolver),
    })
}

fn configure(setup: Setup) -> Result<()> {
    let mut pending = LAZY_SETUP.lock();

    if LAZY.get().is_some() {
        return Err(Error::AlreadyInitialized("lazy"));
    }

    *pending = Some(setup);
    Ok(())
}

/// The process-wide lazy logger, created on first call.
///
/// # Errors
///
/// Returns an error if the logger has to be built and building fails. A later
/// call tries again.
pub fn lazy() -> Result<Arc<FileLogger>> {
    if let Some(logger) = LAZY.get() {
        return Ok(logger.clone());
    }

    let pending = LAZY_SETUP.lock();

    // another caller may have won while we waited for the lock
    if let Some(logger) = LAZY.get() {
        return Ok(logger.clone());
    }

    let logger = Arc::new(pending.clone().unwrap_or_default().build(InitPolicy::Lazy)?);
    LAZY.set(logger.clone())
        .map_err(|_| Error::AlreadyInitialized("lazy"))?;

    Ok(logger)
}
