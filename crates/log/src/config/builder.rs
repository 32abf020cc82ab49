//! Ordered configuration mutators

use std::path::PathBuf;

use super::base::normalize_path;
use super::{Config, Level, Mode, RotateConfig};
use crate::writer::ConsoleTarget;

/// Builds a [`Config`] by applying options in call order.
///
/// Each method overwrites exactly the fields it governs, so a later call wins
/// over an earlier one. [`build`](Self::build) freezes the result.
///
/// ```rust
/// use teelog::{Config, Level};
///
/// let config = Config::builder()
///     .path("app.log")
///     .error_log_path("error.log")
///     .rotate(true)
///     .level(Level::Debug)
///     .build();
/// assert_eq!(config.level(), Level::Debug);
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from [`Config::default`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Floor of the catch-all sinks (console and, without an error file, the
    /// primary file)
    pub fn level(mut self, level: Level) -> Self {
        self.config.level = level;
        self
    }

    /// Attach a captured call stack to records at or above `level`
    pub fn stack_trace(mut self, on: bool, level: Level) -> Self {
        self.config.stack_trace = on;
        self.config.stack_trace_level = level;
        self
    }

    /// Encoder field layout
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Keep the console sink even when a log path is set
    pub fn stdout(mut self, on: bool) -> Self {
        self.config.stdout = on;
        self
    }

    /// Turn rotation on with the default limits (32 MiB, 5 backups, 30 days,
    /// compressed), or off leaving the limits untouched
    pub fn rotate(mut self, on: bool) -> Self {
        if on {
            self.config.rotate = RotateConfig::enabled();
        } else {
            self.config.rotate.enabled = false;
        }
        self
    }

    /// Replace the rotation settings wholesale
    pub fn rotate_with(mut self, rotate: RotateConfig) -> Self {
        self.config.rotate = rotate;
        self
    }

    /// File that receives error records only. An empty path clears it.
    pub fn error_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.error_log_path = normalize_path(path.into());
        self
    }

    /// Primary log file. An empty path clears it.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = normalize_path(path.into());
        self
    }

    /// Encode every sink as JSON
    pub fn json(mut self, on: bool) -> Self {
        self.config.json = on;
        self
    }

    /// Color level labels. Only honoured for human-readable console-only
    /// output.
    pub fn color_level(mut self, on: bool) -> Self {
        self.config.color_level = on;
        self
    }

    /// Where the console sink writes
    pub fn console(mut self, target: ConsoleTarget) -> Self {
        self.config.console = target;
        self
    }

    /// Freeze the configuration
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}

impl From<Config> for ConfigBuilder {
    fn from(config: Config) -> Self {
        Self { config }
    }
}

impl Config {
    /// Start an ordered option chain
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}
