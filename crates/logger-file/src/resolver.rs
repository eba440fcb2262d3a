//! Resolving the directory logs are written to

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Produces the directory the log file lives in.
#[async_trait]
pub trait DirectoryResolver: Send + Sync + 'static {
    /// Resolve the base directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Resolution`] if no usable directory exists.
    async fn resolve(&self) -> Result<PathBuf>;
}

/// The current user's documents directory.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentsDirResolver;

#[async_trait]
impl DirectoryResolver for DocumentsDirResolver {
    async fn resolve(&self) -> Result<PathBuf> {
        let dir = dirs::document_dir()
            .ok_or_else(|| Error::Resolution("no documents directory on this platform".into()))?;

        match tokio::fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => Ok(dir),
            Ok(_) => Err(Error::Resolution(format!(
                "{} is not a directory",
                dir.display()
            ))),
            Err(e) => Err(Error::Resolution(format!("{}: {e}", dir.display()))),
        }
    }
}

/// Always resolves to the same, caller-chosen directory.
#[derive(Clone, Debug)]
pub struct FixedDirResolver {
    dir: PathBuf,
}

impl FixedDirResolver {
    /// Creates a new `FixedDirResolver` with the specified directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DirectoryResolver for FixedDirResolver {
    async fn resolve(&self) -> Result<PathBuf> {
        Ok(self.dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_dir_is_returned_unchanged() {
        let resolver = FixedDirResolver::new("/srv/logs");

        assert_eq!(resolver.resolve().await.unwrap(), PathBuf::from("/srv/logs"));
        assert_eq!(resolver.resolve().await.unwrap(), PathBuf::from("/srv/logs"));
    }
}
