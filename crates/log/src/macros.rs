//! Convenience macros for structured logging
//!
//! Each macro takes a [`Logger`](crate::Logger) followed by the usual
//! `tracing` field and format syntax. Fields keep their call-site names.
//!
//! ```rust
//! use teelog::{CaptureBuffer, Config, ConsoleTarget, RootLogger};
//!
//! let capture = CaptureBuffer::new();
//! let root = RootLogger::new();
//! root.setup(Config::builder().console(ConsoleTarget::Capture(capture.clone())).build())?;
//!
//! let log = root.get("jobs");
//! teelog::info!(log, job_id = 42, "job {} finished", "sync");
//! assert!(capture.contents().contains("job_id=42"));
//! # Ok::<(), teelog::LogError>(())
//! ```

/// Emit a debug record
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($crate::Level::Debug, DEBUG, $logger, $($arg)+)
    };
}

/// Emit an info record
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($crate::Level::Info, INFO, $logger, $($arg)+)
    };
}

/// Emit a warn record
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($crate::Level::Warn, WARN, $logger, $($arg)+)
    };
}

/// Emit an error record
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($crate::Level::Error, ERROR, $logger, $($arg)+)
    };
}

/// Log an error value and return it
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $err:expr) => {{
        let e = $err;
        $crate::error!($logger, error = %e, "operation failed");
        e
    }};
    ($logger:expr, $err:expr, $($arg:tt)+) => {{
        let e = $err;
        $crate::error!($logger, error = %e, $($arg)+);
        e
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($level:expr, $tracing_level:ident, $logger:expr, $($arg:tt)+) => {{
        let __logger: &$crate::Logger = &$logger;
        __logger.__emit($level, |__name, __context, __stack| {
            $crate::__private::tracing::event!(
                $crate::__private::tracing::Level::$tracing_level,
                logger = __name,
                caller = concat!(file!(), ":", line!(), ":", column!()),
                context = __context,
                stacktrace = __stack,
                $($arg)+
            );
        });
    }};
}
