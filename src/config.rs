use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{CleanupScope, Error, Level, Result};

/// Configuration for logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Write lines to stdout
    #[serde(default = "default_console")]
    pub console: bool,
    /// Minimum level that is emitted
    #[serde(default)]
    pub level: Level,
    /// Display name inserted into every line
    #[serde(default)]
    pub name: Option<String>,
    /// Daily file hook configuration
    pub file: Option<FileHookConfig>,
}

impl LogConfig {
    /// Create a new LogConfig with defaults
    pub fn new() -> Self {
        Self {
            console: default_console(),
            level: Level::default(),
            name: None,
            file: None,
        }
    }

    /// Enable console logging
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Set log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set file hook configuration
    pub fn with_file(mut self, file: FileHookConfig) -> Self {
        self.file = Some(file);
        self
    }

    pub fn validate(&self) -> Result<()> {
        match &self.file {
            Some(file) => file.validate(),
            None => Ok(()),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_console() -> bool {
    true
}

/// Configuration for the daily file hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHookConfig {
    /// Directory holding one file per day
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// `time` format description for file names, without the `.log` extension
    #[serde(default = "default_name_format")]
    pub name_format: String,
    /// Number of most recent days to keep
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Which entries retention cleanup may delete
    #[serde(default)]
    pub cleanup: CleanupScope,
}

impl FileHookConfig {
    /// Create a new FileHookConfig for a directory
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_name_format(mut self, name_format: impl Into<String>) -> Self {
        self.name_format = name_format.into();
        self
    }

    pub fn with_retention_days(mut self, retention_days: u32) -> Self {
        self.retention_days = retention_days;
        self
    }

    pub fn with_cleanup(mut self, cleanup: CleanupScope) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Reject a retention window under one day or an unparsable name format.
    pub fn validate(&self) -> Result<()> {
        if self.retention_days < 1 {
            return Err(Error::Config(
                "retention_days cannot be less than 1".to_string(),
            ));
        }
        time::format_description::parse(&self.name_format)
            .map_err(|e| Error::Config(format!("invalid name_format: {e}")))?;
        Ok(())
    }
}

impl Default for FileHookConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            name_format: default_name_format(),
            retention_days: default_retention_days(),
            cleanup: CleanupScope::default(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("log")
}

fn default_name_format() -> String {
    "[year]-[month]-[day]".to_string()
}

fn default_retention_days() -> u32 {
    10
}
