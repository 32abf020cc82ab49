//! Configuration presets for common scenarios

use super::{Config, ConfigBuilder, Level, Mode};
use crate::core::LogResult;

impl Config {
    /// Create configuration from `TEELOG_*` environment variables
    ///
    /// | Variable            | Effect                                   |
    /// |---------------------|------------------------------------------|
    /// | `TEELOG_LEVEL`      | catch-all level                          |
    /// | `TEELOG_MODE`       | `development` / `production`             |
    /// | `TEELOG_PATH`       | primary log file                         |
    /// | `TEELOG_ERROR_PATH` | error-only log file                      |
    /// | `TEELOG_STDOUT`     | keep console output next to files        |
    /// | `TEELOG_JSON`       | JSON encoding                            |
    /// | `TEELOG_COLOR`      | colored levels                           |
    /// | `TEELOG_ROTATE`     | rotation with default limits             |
    /// | `TEELOG_STACKTRACE` | stack traces at or above the given level |
    ///
    /// # Errors
    ///
    /// Returns an error if a level or mode variable holds an unknown name.
    pub fn from_env() -> LogResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    ///
    /// # Errors
    ///
    /// Returns an error if a level or mode value holds an unknown name.
    pub fn from_lookup<F>(lookup: F) -> LogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ConfigBuilder::new();

        if let Some(level) = lookup("TEELOG_LEVEL") {
            builder = builder.level(level.parse()?);
        }
        if let Some(mode) = lookup("TEELOG_MODE") {
            builder = builder.mode(mode.parse()?);
        }
        if let Some(path) = lookup("TEELOG_PATH") {
            builder = builder.path(path);
        }
        if let Some(path) = lookup("TEELOG_ERROR_PATH") {
            builder = builder.error_log_path(path);
        }
        if let Some(v) = lookup("TEELOG_STDOUT") {
            builder = builder.stdout(flag(&v));
        }
        if let Some(v) = lookup("TEELOG_JSON") {
            builder = builder.json(flag(&v));
        }
        if let Some(v) = lookup("TEELOG_COLOR") {
            builder = builder.color_level(flag(&v));
        }
        if let Some(v) = lookup("TEELOG_ROTATE") {
            builder = builder.rotate(flag(&v));
        }
        if let Some(level) = lookup("TEELOG_STACKTRACE") {
            builder = builder.stack_trace(true, level.parse()?);
        }

        Ok(builder.build())
    }

    /// Development configuration (debug level, colored console, errors with
    /// stack traces)
    #[must_use]
    pub fn development() -> Self {
        Self::builder()
            .mode(Mode::Development)
            .level(Level::Debug)
            .stdout(true)
            .color_level(true)
            .stack_trace(true, Level::Error)
            .build()
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self::builder()
            .mode(Mode::Production)
            .level(Level::Info)
            .json(true)
            .build()
    }
}

fn flag(v: &str) -> bool {
    v != "0" && !v.eq_ignore_ascii_case("false") && !v.is_empty()
}
