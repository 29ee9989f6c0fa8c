//! Severity levels and the terminal colors attached to them.
//!
//! Ordinals are compared raw when filtering: a message passes when its
//! ordinal is at least the configured threshold. The table is not ordered by
//! importance (`pretty` sits above `error`), and that is kept on purpose so
//! thresholds behave the same as in existing deployments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Log severity. The discriminant is the ordinal used for filtering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Trace = 0,
    Info = 1,
    Debug = 2,
    Error = 3,
    Panic = 4,
    Pretty = 5,
}

impl Level {
    /// Numeric position in the level table.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look a level up by ordinal.
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Trace),
            1 => Some(Self::Info),
            2 => Some(Self::Debug),
            3 => Some(Self::Error),
            4 => Some(Self::Panic),
            5 => Some(Self::Pretty),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Error => "error",
            Self::Panic => "panic",
            Self::Pretty => "pretty",
        }
    }

    /// Bracketed tag written in front of every line.
    pub const fn tag(self) -> &'static str {
        tag_for_ordinal(self.ordinal())
    }

    /// Color used for lines at this level.
    pub const fn color(self) -> Color {
        Color::for_ordinal(self.ordinal())
    }

    pub const fn all() -> [Self; 6] {
        [
            Self::Trace,
            Self::Info,
            Self::Debug,
            Self::Error,
            Self::Panic,
            Self::Pretty,
        ]
    }
}

/// Tag for a raw ordinal; anything outside the table renders as `[]`.
pub const fn tag_for_ordinal(ordinal: u8) -> &'static str {
    match ordinal {
        0 => "[trace]",
        1 => "[info]",
        2 => "[debug]",
        3 => "[error]",
        4 => "[panic]",
        5 => "[pretty]",
        _ => "[]",
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a level name is not in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "error" | "err" => Ok(Self::Error),
            "panic" => Ok(Self::Panic),
            "pretty" => Ok(Self::Pretty),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// SGR foreground color codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
    Gray = 37,
}

impl Color {
    /// Resets all SGR attributes.
    pub const RESET: &'static str = "\x1b[0m";

    pub const fn for_ordinal(ordinal: u8) -> Self {
        match ordinal {
            0 => Self::Gray,
            1 => Self::Green,
            2 => Self::Yellow,
            3 => Self::Red,
            4 | 5 => Self::Gray,
            _ => Self::Blue,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Color {
    /// Writes the escape sequence that starts this color.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\x1b[{}m", self.code())
    }
}
