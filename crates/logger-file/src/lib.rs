//! Append-only file logger for doclog
//!
//! This crate provides a logger that appends one human-readable line per
//! record to a file in the user's documents directory:
//! - Fire-and-forget `log`, with writes serialized through one queue
//! - Eager or lazy resolution of the target file
//! - Process-wide shared instances for both policies
//! - Explicit drain for shutdown and tests
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod logger;
mod resolver;
mod shared;
mod target;
mod writer;

pub use config::{
    EAGER_FILE_NAME, FileLoggerConfig, FileLoggerConfigBuilder, InitPolicy, LAZY_FILE_NAME,
};
pub use error::{Error, Result};
pub use logger::FileLogger;
pub use resolver::{DirectoryResolver, DocumentsDirResolver, FixedDirResolver};
pub use shared::{
    configure_lazy, configure_lazy_with_resolver, eager, init_eager, init_eager_with_resolver,
    lazy,
};
pub use writer::append;
