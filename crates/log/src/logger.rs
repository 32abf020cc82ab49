//! Root logger handle and named loggers

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use smallvec::SmallVec;
use tracing::Dispatch;
use tracing::field::{self, DisplayValue};

use crate::builder::RoutingTable;
use crate::config::{Config, Level};
use crate::core::LogResult;
use crate::layer::SeverityPredicate;
use crate::writer::{Destination, DestinationKind};

/// One installed routing table
pub(crate) struct Handle {
    dispatch: Dispatch,
    destinations: SmallVec<[Destination; 3]>,
    predicates: SmallVec<[SeverityPredicate; 3]>,
    stack_trace: Option<Level>,
}

impl Handle {
    fn new(table: &RoutingTable) -> Self {
        Self {
            dispatch: table.dispatch(),
            destinations: table
                .bindings()
                .iter()
                .map(|b| b.destination().clone())
                .collect(),
            predicates: table.bindings().iter().map(|b| *b.predicate()).collect(),
            stack_trace: table.stack_trace(),
        }
    }

    fn enabled(&self, level: Level) -> bool {
        self.predicates.iter().any(|p| p.accepts(level))
    }

    fn capture_stack(&self, level: Level) -> Option<Backtrace> {
        self.stack_trace
            .filter(|threshold| level >= *threshold)
            .map(|_| Backtrace::force_capture())
    }
}

/// Hot-swappable root of the logging system.
///
/// A process normally uses the shared instance behind [`crate::setup`] and
/// [`crate::get`]; components that prefer explicit wiring can own one.
///
/// ```rust
/// use teelog::{CaptureBuffer, Config, ConsoleTarget, Level, RootLogger};
///
/// let capture = CaptureBuffer::new();
/// let root = RootLogger::new();
/// root.setup(
///     Config::builder()
///         .level(Level::Warn)
///         .console(ConsoleTarget::Capture(capture.clone()))
///         .build(),
/// )?;
///
/// let log = root.get("db");
/// log.info("dropped");
/// log.warn("kept");
/// assert_eq!(capture.lines().len(), 1);
/// # Ok::<(), teelog::LogError>(())
/// ```
pub struct RootLogger {
    current: Arc<ArcSwap<Handle>>,
    setup_lock: Mutex<()>,
}

impl RootLogger {
    /// Root with the bootstrap handle: human-readable stdout at debug level,
    /// no color
    pub fn new() -> Self {
        let table = RoutingTable::console_only(&Config::bootstrap());
        Self {
            current: Arc::new(ArcSwap::from_pointee(Handle::new(&table))),
            setup_lock: Mutex::new(()),
        }
    }

    /// Build a routing table for `config` and install it.
    ///
    /// All or nothing: on error the previous handle stays active. Records
    /// already in flight on the previous handle still complete; its file
    /// destinations close once the last of them finishes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LogError::Open`] if a log file cannot be
    /// opened.
    pub fn setup(&self, config: Config) -> LogResult<()> {
        let _guard = self.setup_lock.lock();
        let table = RoutingTable::build(&config)?;
        let previous = self.current.swap(Arc::new(Handle::new(&table)));
        for destination in &previous.destinations {
            // best effort, the old handle is on its way out
            let _ = destination.flush();
        }
        Ok(())
    }

    /// Logger labelled `name`. It routes through whatever handle is
    /// installed when each record is emitted.
    pub fn get(&self, name: &str) -> Logger {
        Logger {
            current: Arc::clone(&self.current),
            name: Arc::from(name),
            context: None,
        }
    }

    /// Close every destination of the installed handle.
    ///
    /// Call once at shutdown. The console is flushed and keeps working;
    /// file destinations stop accepting records.
    ///
    /// # Errors
    ///
    /// Returns the first failure. A file destination that was already closed
    /// reports [`crate::LogError::Closed`].
    pub fn flush(&self) -> LogResult<()> {
        let _guard = self.setup_lock.lock();
        let handle = self.current.load();
        let mut first = None;
        for destination in &handle.destinations {
            if let Err(e) = destination.close() {
                first.get_or_insert(e);
            }
        }
        first.map_or(Ok(()), Err)
    }

    /// Destinations of the installed handle, in routing order
    pub fn sinks(&self) -> Vec<DestinationKind> {
        self.current
            .load()
            .destinations
            .iter()
            .map(|d| d.kind().clone())
            .collect()
    }
}

impl Default for RootLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RootLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootLogger")
            .field("sinks", &self.sinks())
            .finish()
    }
}

macro_rules! event_at {
    ($level:expr, $($fields:tt)+) => {
        match $level {
            Level::Debug => tracing::debug!($($fields)+),
            Level::Info => tracing::info!($($fields)+),
            Level::Warn => tracing::warn!($($fields)+),
            Level::Error => tracing::error!($($fields)+),
        }
    };
}

/// Named view over a [`RootLogger`]
///
/// Cheap to clone; holds no sink state of its own.
#[derive(Clone)]
pub struct Logger {
    current: Arc<ArcSwap<Handle>>,
    name: Arc<str>,
    context: Option<Arc<Value>>,
}

impl Logger {
    /// Dotted logger name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child logger named `parent.child`
    pub fn named(&self, child: &str) -> Self {
        let name: Arc<str> = match (self.name.is_empty(), child.is_empty()) {
            (_, true) => Arc::clone(&self.name),
            (true, false) => Arc::from(child),
            (false, false) => Arc::from(format!("{}.{child}", self.name)),
        };
        Self {
            name,
            ..self.clone()
        }
    }

    /// Logger that attaches `key: value` to every record it emits
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = match self.context.as_deref() {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        map.insert(key.into(), value.into());
        Self {
            context: Some(Arc::new(Value::Object(map))),
            ..self.clone()
        }
    }

    /// Whether any sink of the installed handle accepts `level`
    pub fn enabled(&self, level: Level) -> bool {
        self.current.load().enabled(level)
    }

    /// Emit `message` at `level`
    #[track_caller]
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        let caller = Location::caller();
        self.__emit(level, |name, context, stacktrace| {
            event_at!(
                level,
                logger = name,
                caller = %caller,
                context,
                stacktrace,
                "{}",
                message
            );
        });
    }

    /// Emit at debug level
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    /// Emit at info level
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    /// Emit at warn level
    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::Warn, message);
    }

    /// Emit at error level
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    /// Runs `emit` against the installed handle. Used by the logging macros.
    #[doc(hidden)]
    pub fn __emit<F>(&self, level: Level, emit: F)
    where
        F: FnOnce(&str, Option<DisplayValue<&Value>>, Option<DisplayValue<&Backtrace>>),
    {
        let handle = self.current.load();
        if !handle.enabled(level) {
            return;
        }
        let stack = handle.capture_stack(level);
        tracing::dispatcher::with_default(&handle.dispatch, || {
            emit(
                &self.name,
                self.context.as_deref().map(field::display),
                stack.as_ref().map(field::display),
            );
        });
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("context", &self.context)
            .finish()
    }
}
