//! # teelog
//!
//! Process-wide structured logging that fans records out to a console, a
//! primary log file (plain or rotating) and an error-only log file, each with
//! its own severity filter.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use teelog::{Config, Level};
//!
//! fn main() -> teelog::LogResult<()> {
//!     teelog::setup(
//!         Config::builder()
//!             .path("app.log")
//!             .error_log_path("error.log")
//!             .rotate(true)
//!             .level(Level::Info)
//!             .build(),
//!     )?;
//!
//!     let log = teelog::get("server");
//!     log.info("starting");
//!     teelog::error!(log, port = 8080, "bind failed");
//!
//!     teelog::flush()
//! }
//! ```
//!
//! ## Routing
//!
//! | Options                     | Primary file  | Error file | Console       |
//! |-----------------------------|---------------|------------|---------------|
//! | none                        | -             | -          | `>= level`    |
//! | `path`                      | `>= level`    | -          | only `stdout` |
//! | `path` + `error_log_path`   | `< Error`     | `Error`    | only `stdout` |
//! | `error_log_path`            | -             | `Error`    | `>= level`    |
//!
//! Before [`setup`] runs, records go to stdout at debug level.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod core;
mod format;
mod layer;
mod logger;
mod macros;
mod writer;

use std::sync::LazyLock;

// Public API
pub use builder::{EncoderConfig, Encoding, RoutingTable, SinkBinding};
pub use config::{Config, ConfigBuilder, Level, Mode, RotateConfig};
pub use core::{LogError, LogResult};
pub use format::EpochTime;
pub use layer::{Band, SeverityPredicate};
pub use logger::{Logger, RootLogger};
pub use writer::{
    CaptureBuffer, ConsoleSink, ConsoleTarget, Destination, DestinationKind, DestinationWriter,
    FileSink, RotatingFileSink, Sink,
};

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}

static ROOT: LazyLock<RootLogger> = LazyLock::new(RootLogger::new);

// ============================================================================
// Process-wide root
// ============================================================================

/// The process-wide root logger
pub fn root() -> &'static RootLogger {
    &ROOT
}

/// Install `config` on the process-wide root
///
/// # Errors
///
/// Returns [`LogError::Open`] if a log file cannot be opened; the
/// previous logger stays active.
pub fn setup(config: Config) -> LogResult<()> {
    ROOT.setup(config)
}

/// Install configuration read from `TEELOG_*` environment variables
///
/// # Errors
///
/// Returns an error on unknown level or mode names, or when a log file
/// cannot be opened.
pub fn setup_from_env() -> LogResult<()> {
    ROOT.setup(Config::from_env()?)
}

/// Named logger on the process-wide root
pub fn get(name: &str) -> Logger {
    ROOT.get(name)
}

/// Close every destination of the process-wide root. Call once at shutdown.
///
/// # Errors
///
/// Returns the first destination failure, [`LogError::Closed`] on a second
/// call.
pub fn flush() -> LogResult<()> {
    ROOT.flush()
}
