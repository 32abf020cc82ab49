//! Core configuration types

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::RotateConfig;
use crate::core::LogError;
use crate::writer::ConsoleTarget;

/// Log level
///
/// Ordered `Debug < Info < Warn < Error`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Debug level
    #[default]
    Debug,
    /// Info level
    Info,
    /// Warn level
    #[serde(alias = "warning")]
    Warn,
    /// Error level
    Error,
}

impl Level {
    /// All levels, lowest first
    pub const ALL: [Self; 4] = [Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// The matching `tracing` level
    pub const fn as_tracing(self) -> tracing::Level {
        match self {
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }

    /// Map a `tracing` level back. `TRACE` has no counterpart.
    pub fn from_tracing(level: &tracing::Level) -> Option<Self> {
        match *level {
            tracing::Level::DEBUG => Some(Self::Debug),
            tracing::Level::INFO => Some(Self::Info),
            tracing::Level::WARN => Some(Self::Warn),
            tracing::Level::ERROR => Some(Self::Error),
            _ => None,
        }
    }

    /// Lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}

/// Encoder field layout
///
/// Development output is meant for people reading a terminal; production
/// output is meant for log collectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Full lines, nested JSON fields, RFC 3339 timestamps
    #[default]
    Development,
    /// Compact lines, flattened JSON fields, epoch-seconds timestamps
    Production,
}

impl FromStr for Mode {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(LogError::InvalidMode(s.to_string())),
        }
    }
}

/// Logging configuration
///
/// Frozen once built: produce one with [`Config::builder`], a preset, serde,
/// or [`Config::from_env`], then hand it to [`crate::setup`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub(crate) level: Level,
    pub(crate) stack_trace: bool,
    pub(crate) stack_trace_level: Level,
    pub(crate) mode: Mode,
    #[serde(deserialize_with = "non_empty_path")]
    pub(crate) log_path: Option<PathBuf>,
    #[serde(deserialize_with = "non_empty_path")]
    pub(crate) error_log_path: Option<PathBuf>,
    pub(crate) stdout: bool,
    pub(crate) json: bool,
    pub(crate) color_level: bool,
    pub(crate) rotate: RotateConfig,
    #[serde(skip)]
    pub(crate) console: ConsoleTarget,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::Info,
            stack_trace: false,
            stack_trace_level: Level::default(),
            mode: Mode::Development,
            log_path: None,
            error_log_path: None,
            stdout: false,
            json: false,
            color_level: false,
            rotate: RotateConfig::default(),
            console: ConsoleTarget::Stdout,
        }
    }
}

impl Config {
    /// Floor of the catch-all sinks
    pub fn level(&self) -> Level {
        self.level
    }

    /// Threshold for stack trace capture, `None` when disabled
    pub fn stack_trace(&self) -> Option<Level> {
        self.stack_trace.then_some(self.stack_trace_level)
    }

    /// Encoder field layout
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Primary log file
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Error-only log file
    pub fn error_log_path(&self) -> Option<&Path> {
        self.error_log_path.as_deref()
    }

    /// Whether the console sink was requested explicitly
    pub fn stdout(&self) -> bool {
        self.stdout
    }

    /// Whether every sink encodes JSON
    pub fn json(&self) -> bool {
        self.json
    }

    /// Whether colored levels were requested
    pub fn color_level(&self) -> bool {
        self.color_level
    }

    /// Rotation settings shared by both file destinations
    pub fn rotate(&self) -> &RotateConfig {
        &self.rotate
    }

    /// Where the console sink writes
    pub fn console(&self) -> &ConsoleTarget {
        &self.console
    }

    /// Whether level labels end up colored on the console.
    ///
    /// Color is dropped whenever output may be JSON or land in the primary
    /// log file.
    pub fn colorize(&self) -> bool {
        cfg!(feature = "ansi") && self.color_level && !self.json && self.log_path.is_none()
    }

    /// Configuration of the logger that is active before any setup:
    /// human-readable console output at debug level, no color.
    pub(crate) fn bootstrap() -> Self {
        Self {
            level: Level::Debug,
            stdout: true,
            ..Self::default()
        }
    }
}

/// Treat `""` the same as an absent path
pub(crate) fn normalize_path(path: PathBuf) -> Option<PathBuf> {
    (!path.as_os_str().is_empty()).then_some(path)
}

fn non_empty_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let path = Option::<PathBuf>::deserialize(deserializer)?;
    Ok(path.and_then(normalize_path))
}
