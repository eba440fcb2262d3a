//! Where the next line goes

use crate::config::InitPolicy;
use crate::error::{Error, Result};
use crate::resolver::DirectoryResolver;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// State of the eager instance's one-time path resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    Pending,
    Resolved(PathBuf),
    Failed(String),
}

/// The target file path of a logger.
///
/// Eager targets are resolved at most once and only read afterwards. Lazy
/// targets go through the resolver on every call.
#[derive(Clone)]
pub(crate) struct TargetPath {
    resolver: Arc<dyn DirectoryResolver>,
    file_name: String,
    eager: Option<watch::Receiver<Resolution>>,
}

impl TargetPath {
    /// Build a target. For eager targets the returned sender must be handed
    /// to [`resolve_once`].
    pub(crate) fn new(
        policy: InitPolicy,
        resolver: Arc<dyn DirectoryResolver>,
        file_name: String,
    ) -> (Self, Option<watch::Sender<Resolution>>) {
        let (sender, eager) = match policy {
            InitPolicy::Eager => {
                let (sender, receiver) = watch::channel(Resolution::Pending);
                (Some(sender), Some(receiver))
            }
            InitPolicy::Lazy => (None, None),
        };

        let target = Self {
            resolver,
            file_name,
            eager,
        };

        (target, sender)
    }

    /// Path for the next write.
    ///
    /// Never waits on an eager resolution still in flight.
    pub(crate) async fn current(&self) -> Result<PathBuf> {
        let Some(state) = &self.eager else {
            return self.resolve().await;
        };

        let resolution = state.borrow().clone();
        match resolution {
            Resolution::Resolved(path) => Ok(path),
            Resolution::Pending => Err(Error::Unresolved),
            Resolution::Failed(reason) => Err(Error::Resolution(reason)),
        }
    }

    /// Resolved path if it is already known. Always `None` for lazy targets.
    pub(crate) fn resolved(&self) -> Option<PathBuf> {
        match &*self.eager.as_ref()?.borrow() {
            Resolution::Resolved(path) => Some(path.clone()),
            Resolution::Pending | Resolution::Failed(_) => None,
        }
    }

    /// Wait until an eager target is resolved, or resolve a lazy one now.
    pub(crate) async fn wait_resolved(&self) -> Result<PathBuf> {
        let Some(state) = &self.eager else {
            return self.resolve().await;
        };

        let mut state = state.clone();
        let resolution = state
            .wait_for(|resolution| *resolution != Resolution::Pending)
            .await
            .map_err(|_| Error::ChannelClosed)?;

        match &*resolution {
            Resolution::Resolved(path) => Ok(path.clone()),
            Resolution::Failed(reason) => Err(Error::Resolution(reason.clone())),
            Resolution::Pending => Err(Error::Unresolved),
        }
    }

    async fn resolve(&self) -> Result<PathBuf> {
        let dir = self.resolver.resolve().await?;
        Ok(dir.join(&self.file_name))
    }
}

/// Resolve an eager target and publish the outcome exactly once.
pub(crate) async fn resolve_once(target: TargetPath, sender: watch::Sender<Resolution>) {
    let outcome = match target.resolve().await {
        Ok(path) => {
            debug!("log file resolved to {}", path.display());
            Resolution::Resolved(path)
        }
        Err(e) => {
            warn!("failed to resolve log file: {e}");
            Resolution::Failed(e.to_string())
        }
    };

    sender.send_replace(outcome);
}
