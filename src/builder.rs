//! Builder pattern for initializing logging configuration.
//!
//! # Example
//!
//! ```rust,no_run
//! use tlog::Level;
//!
//! // Console only
//! tlog::builder()
//!     .with_level(Level::Info)
//!     .with_name("api")
//!     .init()
//!     .expect("Failed to initialize logging");
//!
//! // Mirrored to one file per day under ./log, keeping a week
//! tlog::builder()
//!     .with_level(Level::Debug)
//!     .with_file("log")
//!     .with_retention_days(7)
//!     .init()
//!     .expect("Failed to initialize logging");
//! ```

use crate::{CleanupScope, FileHookConfig, Level, LogConfig, Result, init_logging};
use std::path::PathBuf;

/// A builder for configuring and initializing the global logger.
#[derive(Debug, Clone)]
pub struct LogBuilder {
    config: LogConfig,
}

impl LogBuilder {
    /// Create a new LogBuilder with default configuration.
    pub fn new() -> Self {
        Self {
            config: LogConfig::new(),
        }
    }

    /// Create a LogBuilder from an existing configuration.
    pub fn from_config(config: LogConfig) -> Self {
        Self { config }
    }

    /// Enable or disable stdout output.
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config = self.config.with_console(enabled);
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.config = self.config.with_level(level);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config = self.config.with_name(name);
        self
    }

    /// Mirror lines into daily files under `dir`.
    pub fn with_file(mut self, dir: impl Into<PathBuf>) -> Self {
        let file = match self.config.file.take() {
            Some(file) => FileHookConfig {
                path: dir.into(),
                ..file
            },
            None => FileHookConfig::new(dir),
        };
        self.config = self.config.with_file(file);
        self
    }

    pub fn with_file_config(mut self, file: FileHookConfig) -> Self {
        self.config = self.config.with_file(file);
        self
    }

    /// Set the file name format. Enables file output in the default
    /// directory if none is configured yet.
    pub fn with_name_format(mut self, name_format: impl Into<String>) -> Self {
        let file = self.config.file.take().unwrap_or_default();
        self.config.file = Some(file.with_name_format(name_format));
        self
    }

    /// Set how many days of files to keep. Enables file output in the
    /// default directory if none is configured yet.
    pub fn with_retention_days(mut self, days: u32) -> Self {
        let file = self.config.file.take().unwrap_or_default();
        self.config.file = Some(file.with_retention_days(days));
        self
    }

    pub fn with_cleanup(mut self, cleanup: CleanupScope) -> Self {
        let file = self.config.file.take().unwrap_or_default();
        self.config.file = Some(file.with_cleanup(cleanup));
        self
    }

    /// Get the current configuration without initializing.
    pub fn build(self) -> LogConfig {
        self.config
    }

    /// Apply the configuration to the global logger.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the retention window is under one
    /// day or the name format does not parse.
    pub fn init(self) -> Result<()> {
        init_logging(&self.config)
    }
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
