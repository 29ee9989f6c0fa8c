//! # tlog
//!
//! A small leveled logger that writes colorized, prefixed lines to stdout and
//! can mirror them into one file per day with retention cleanup.
//!
//! ## Features
//!
//! - Six levels with a raw-ordinal threshold
//! - Caller `file:line` on every line
//! - Daily rotating file hook that creates its directory and removes files
//!   outside the retention window
//! - Indented JSON output for `serde` values
//! - Configuration from code, YAML or TOML
//!
//! ## Example
//!
//! ```rust,no_run
//! use tlog::Level;
//!
//! tlog::builder()
//!     .with_level(Level::Info)
//!     .with_name("api")
//!     .with_file("log")
//!     .with_retention_days(7)
//!     .init()?;
//!
//! tlog::info("server started");
//! tlog::infof!("listening on {}", 8080);
//! # Ok::<(), tlog::Error>(())
//! ```

pub mod builder;
pub mod clock;
pub mod config;
pub mod error;
pub mod hook;
pub mod level;
pub mod logger;
pub mod rotation;
pub mod tracing_init;
pub mod writer;

pub use builder::LogBuilder;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{FileHookConfig, LogConfig};
pub use error::{Error, Result};
pub use hook::Hook;
pub use level::{Color, Level};
pub use logger::{
    Logger, attach_hook, attach_output, debug, detach_hook, error, info, init_logging, log,
    log_values, logf, logger, panic, pretty, set_level, set_name, trace,
};
pub use rotation::CleanupScope;
pub use tracing_init::init_diagnostics;
pub use writer::{DiagnosticHandler, RotatingHook, default_hook};

/// Start configuring the global logger.
pub fn builder() -> LogBuilder {
    LogBuilder::new()
}
