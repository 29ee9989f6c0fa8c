//! The leveled logger and its process-wide instance.
//!
//! Every line has the shape
//!
//! ```text
//! 2024-01-02 15:04:05 \x1b[32m[info] [name] src/main.rs:12 message \x1b[0m
//! ```
//!
//! and is written to the primary output, then to the attached hook if there
//! is one. Entry points are `#[track_caller]`, so the `file:line` part points
//! at the code that called into the logger.

use std::fmt::{self, Display};
use std::io::{self, Write};
use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard};

use once_cell::sync::Lazy;
use serde::Serialize;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::clock::{Clock, SystemClock};
use crate::level::Color;
use crate::{Hook, Level, LogConfig, Result, default_hook};

static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// The process-wide logger used by the free functions and macros.
pub fn logger() -> &'static Logger {
    &LOGGER
}

const DEFAULT_NAME: &str = " ";

struct LoggerState {
    output: Box<dyn Write + Send>,
    hook: Option<Arc<dyn Hook>>,
    threshold: Level,
    name: String,
}

/// A leveled logger writing to one primary output and an optional hook.
pub struct Logger {
    clock: Arc<dyn Clock>,
    state: Mutex<LoggerState>,
}

impl Logger {
    /// Logger on stdout, letting every level through, without a hook.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: Mutex::new(LoggerState {
                output: Box::new(io::stdout()),
                hook: None,
                threshold: Level::Trace,
                name: DEFAULT_NAME.to_string(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Set the minimum level that is emitted.
    pub fn set_level(&self, level: Level) {
        self.lock().threshold = level;
    }

    pub fn level(&self) -> Level {
        self.lock().threshold
    }

    /// Set the display name shown after the level tag.
    pub fn set_name(&self, name: &str) {
        self.lock().name = format!(" [{name}] ");
    }

    /// Replace the primary output.
    pub fn attach_output<W: Write + Send + 'static>(&self, output: W) {
        self.lock().output = Box::new(output);
    }

    /// Replace the secondary sink.
    pub fn attach_hook(&self, hook: Arc<dyn Hook>) {
        self.lock().hook = Some(hook);
    }

    pub fn detach_hook(&self) {
        self.lock().hook = None;
    }

    /// Whether a message at `level` passes the threshold.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.lock().threshold
    }

    /// Apply a configuration: threshold, name, console output and file hook.
    ///
    /// The file section configures the process-wide [`default_hook`].
    pub fn init(&self, config: &LogConfig) -> Result<()> {
        config.validate()?;

        if let Some(file) = &config.file {
            let hook = default_hook();
            hook.apply(file.clone())?;
            self.attach_hook(hook);
        } else {
            self.detach_hook();
        }

        let mut state = self.lock();
        state.threshold = config.level;
        state.name = match &config.name {
            Some(name) => format!(" [{name}] "),
            None => DEFAULT_NAME.to_string(),
        };
        state.output = if config.console {
            Box::new(io::stdout())
        } else {
            Box::new(io::sink())
        };
        Ok(())
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl Display) {
        if self.enabled(level) {
            self.emit(level, Location::caller(), &message.to_string());
        }
    }

    /// Log several values joined by a single space.
    #[track_caller]
    pub fn log_values(&self, level: Level, values: &[&dyn Display]) {
        if !self.enabled(level) {
            return;
        }
        let message = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.emit(level, Location::caller(), &message);
    }

    /// Log preformatted arguments, usually built with `format_args!`.
    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.emit(level, Location::caller(), &args.to_string());
        }
    }

    #[track_caller]
    pub fn trace(&self, message: impl Display) {
        self.log(Level::Trace, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Display) {
        self.log(Level::Info, message);
    }

    #[track_caller]
    pub fn debug(&self, message: impl Display) {
        self.log(Level::Debug, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl Display) {
        self.log(Level::Error, message);
    }

    /// Emit at the panic level. Does not unwind.
    #[track_caller]
    pub fn panic(&self, message: impl Display) {
        self.log(Level::Panic, message);
    }

    /// Emit `value` as indented JSON. Values that fail to serialize are
    /// dropped.
    #[track_caller]
    pub fn pretty<T: Serialize + ?Sized>(&self, value: &T) {
        if !self.enabled(Level::Pretty) {
            return;
        }
        match to_pretty_json(value) {
            Ok(json) => self.emit(Level::Pretty, Location::caller(), &json),
            Err(e) => tracing::debug!(error = %e, "pretty value dropped"),
        }
    }

    fn emit(&self, level: Level, location: &Location<'_>, message: &str) {
        let now = self.clock.now();
        let hook = {
            let mut state = self.lock();
            let line = format_line(now, level, &state.name, location, message);
            if let Err(e) = state.output.write_all(line.as_bytes()) {
                tracing::warn!(error = %e, "log output write failed");
            }
            state.hook.clone().map(|hook| (hook, line))
        };
        if let Some((hook, line)) = hook {
            hook.write(line.as_bytes());
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Logger")
            .field("threshold", &state.threshold)
            .field("name", &state.name)
            .field("hook", &state.hook.is_some())
            .finish()
    }
}

fn format_line(
    now: OffsetDateTime,
    level: Level,
    name: &str,
    location: &Location<'_>,
    message: &str,
) -> String {
    let timestamp = now
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_default();
    format!(
        "{timestamp} {color}{tag}{name}{file}:{line} {message} {reset}\n",
        color = level.color(),
        tag = level.tag(),
        file = location.file(),
        line = location.line(),
        reset = Color::RESET,
    )
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Configure the global logger from a [`LogConfig`].
pub fn init_logging(config: &LogConfig) -> Result<()> {
    logger().init(config)
}

pub fn set_level(level: Level) {
    logger().set_level(level);
}

pub fn set_name(name: &str) {
    logger().set_name(name);
}

pub fn attach_output<W: Write + Send + 'static>(output: W) {
    logger().attach_output(output);
}

pub fn attach_hook(hook: Arc<dyn Hook>) {
    logger().attach_hook(hook);
}

pub fn detach_hook() {
    logger().detach_hook();
}

#[track_caller]
pub fn log(level: Level, message: impl Display) {
    logger().log(level, message);
}

#[track_caller]
pub fn log_values(level: Level, values: &[&dyn Display]) {
    logger().log_values(level, values);
}

#[track_caller]
pub fn logf(level: Level, args: fmt::Arguments<'_>) {
    logger().logf(level, args);
}

#[track_caller]
pub fn trace(message: impl Display) {
    logger().trace(message);
}

#[track_caller]
pub fn info(message: impl Display) {
    logger().info(message);
}

#[track_caller]
pub fn debug(message: impl Display) {
    logger().debug(message);
}

#[track_caller]
pub fn error(message: impl Display) {
    logger().error(message);
}

#[track_caller]
pub fn panic(message: impl Display) {
    logger().panic(message);
}

#[track_caller]
pub fn pretty<T: Serialize + ?Sized>(value: &T) {
    logger().pretty(value);
}

/// Log a formatted message at the given level on the global logger.
#[macro_export]
macro_rules! logf {
    ($level:expr, $($arg:tt)+) => {
        $crate::logf($level, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! tracef {
    ($($arg:tt)+) => {
        $crate::logf($crate::Level::Trace, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::logf($crate::Level::Info, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::logf($crate::Level::Debug, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::logf($crate::Level::Error, ::std::format_args!($($arg)+))
    };
}
