//! File logger configuration

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// File name used by the eager instance unless configured otherwise
pub const EAGER_FILE_NAME: &str = "eager_log.txt";

/// File name used by the lazy instance unless configured otherwise
pub const LAZY_FILE_NAME: &str = "lazy_log.txt";

const DEFAULT_THREAD_NAME: &str = "doclog-writer";

/// When the log file path is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitPolicy {
    /// Resolve once, in the background, as soon as the logger is built.
    /// Writes drained before resolution finishes fail.
    Eager,
    /// Resolve again as the first step of every write.
    #[default]
    Lazy,
}

impl InitPolicy {
    /// File name used for this policy when none is configured
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Eager => EAGER_FILE_NAME,
            Self::Lazy => LAZY_FILE_NAME,
        }
    }

    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Eager => "eager",
            Self::Lazy => "lazy",
        }
    }
}

/// Configuration for a [`FileLogger`](crate::FileLogger)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileLoggerConfig {
    /// Initialization policy
    pub policy: InitPolicy,
    /// Log file name inside the resolved directory
    pub file_name: Option<String>,
    /// Fixed directory to log into instead of the platform documents directory
    pub directory: Option<PathBuf>,
    /// Render the record's error and stack trace into the line
    pub error_details: bool,
    /// Report a write before path resolution as [`Error::WriteBeforeResolution`]
    pub strict_resolution: bool,
    /// Name of the writer thread
    pub thread_name: Option<String>,
}

impl FileLoggerConfig {
    /// Create a new config builder
    pub fn builder() -> FileLoggerConfigBuilder {
        FileLoggerConfigBuilder::default()
    }

    /// Log file name, falling back to the policy's default
    pub fn file_name(&self) -> &str {
        self.file_name
            .as_deref()
            .unwrap_or_else(|| self.policy.default_file_name())
    }

    /// Name of the writer thread
    pub fn thread_name(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(DEFAULT_THREAD_NAME)
    }

    /// Check that the config can be used to build a logger.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the file name is empty or is not a
    /// plain file name.
    pub fn validate(&self) -> Result<()> {
        let file_name = self.file_name();

        if file_name.trim().is_empty() {
            return Err(Error::Configuration("file name is empty".to_string()));
        }

        if file_name.contains(['/', '\\']) || file_name == "." || file_name == ".." {
            return Err(Error::Configuration(format!(
                "file name must not contain a path: {file_name}"
            )));
        }

        Ok(())
    }
}

/// Builder for [`FileLoggerConfig`]
#[derive(Debug, Default)]
pub struct FileLoggerConfigBuilder {
    config: FileLoggerConfig,
}

impl FileLoggerConfigBuilder {
    /// Set the initialization policy
    #[must_use]
    pub const fn policy(mut self, policy: InitPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Set the log file name
    #[must_use]
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.config.file_name = Some(file_name.into());
        self
    }

    /// Log into a fixed directory
    #[must_use]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config.directory = Some(directory.into());
        self
    }

    /// Render errors and stack traces into lines
    #[must_use]
    pub const fn error_details(mut self, enabled: bool) -> Self {
        self.config.error_details = enabled;
        self
    }

    /// Report writes before resolution as a hard error on the next drain
    #[must_use]
    pub const fn strict_resolution(mut self, enabled: bool) -> Self {
        self.config.strict_resolution = enabled;
        self
    }

    /// Set the writer thread name
    #[must_use]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.config.thread_name = Some(name.into());
        self
    }

    /// Build the config
    pub fn build(self) -> FileLoggerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_follows_policy() {
        let eager = FileLoggerConfig::builder()
            .policy(InitPolicy::Eager)
            .build();
        let lazy = FileLoggerConfig::default();

        assert_eq!(eager.file_name(), EAGER_FILE_NAME);
        assert_eq!(lazy.file_name(), LAZY_FILE_NAME);
    }

    #[test]
    fn test_explicit_file_name_wins() {
        let config = FileLoggerConfig::builder()
            .policy(InitPolicy::Eager)
            .file_name("app.log")
            .build();

        assert_eq!(config.file_name(), "app.log");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_paths_and_empty_names() {
        for name in ["", "  ", "logs/app.log", "..\\app.log", ".."] {
            let config = FileLoggerConfig::builder().file_name(name).build();
            assert!(
                matches!(config.validate(), Err(Error::Configuration(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: FileLoggerConfig = toml::from_str(
            r#"
            policy = "eager"
            directory = "/var/tmp/app"
            error_details = true
            "#,
        )
        .unwrap();

        assert_eq!(config.policy, InitPolicy::Eager);
        assert_eq!(config.file_name(), EAGER_FILE_NAME);
        assert_eq!(config.directory, Some(PathBuf::from("/var/tmp/app")));
        assert!(config.error_details);
        assert!(!config.strict_resolution);
        assert_eq!(config.thread_name(), "doclog-writer");
    }
}
