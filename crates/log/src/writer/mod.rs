//! Writer implementations
//!
//! A [`Destination`] owns one byte [`Sink`] behind a mutex. The backend asks
//! it for a writer once per record and holds the lock while the whole encoded
//! record is written, so two threads never interleave partial writes.

mod console;
mod file;
mod rotating;

// Standard library
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// External dependencies
use parking_lot::{Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;

// Internal crates
use crate::config::RotateConfig;
use crate::core::{LogError, LogResult};

pub use console::{CaptureBuffer, ConsoleSink, ConsoleTarget};
pub use file::FileSink;
pub use rotating::RotatingFileSink;

/// Byte sink that can be closed explicitly
pub trait Sink: io::Write + Send + 'static {
    /// Flush buffered bytes and release the underlying handle
    ///
    /// # Errors
    ///
    /// Returns the IO error raised while flushing or syncing.
    fn close(&mut self) -> io::Result<()>;
}

/// What a destination writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationKind {
    /// The console target (stdout unless configured otherwise)
    Console,
    /// Plain append-only file
    File(PathBuf),
    /// Size-rotated file
    RotatingFile(PathBuf),
}

impl DestinationKind {
    /// File path, if the destination is a file
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Console => None,
            Self::File(path) | Self::RotatingFile(path) => Some(path),
        }
    }
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => f.write_str("console"),
            Self::File(path) | Self::RotatingFile(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Exclusively owned, mutex-guarded sink
#[derive(Clone)]
pub struct Destination {
    inner: Arc<Shared>,
}

struct Shared {
    kind: DestinationKind,
    slot: Mutex<Option<Box<dyn Sink>>>,
}

impl Destination {
    /// Console destination
    pub fn console(target: &ConsoleTarget) -> Self {
        Self::new(DestinationKind::Console, Box::new(ConsoleSink::new(target)))
    }

    /// Plain file opened in append-create mode
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Open`] if the file cannot be opened.
    pub fn file(path: &Path) -> LogResult<Self> {
        let sink = FileSink::open(path).map_err(|e| LogError::open(path, e))?;
        Ok(Self::new(DestinationKind::File(path.to_path_buf()), Box::new(sink)))
    }

    /// Rotating file; missing parent directories are created
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Open`] if the directory or the active file cannot
    /// be created.
    pub fn rotating(path: &Path, rotate: &RotateConfig) -> LogResult<Self> {
        let sink = RotatingFileSink::open(path, rotate).map_err(|e| LogError::open(path, e))?;
        Ok(Self::new(
            DestinationKind::RotatingFile(path.to_path_buf()),
            Box::new(sink),
        ))
    }

    /// File destination for `path`, rotating when `rotate.enabled`
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Open`] if the file cannot be opened.
    pub fn open(path: &Path, rotate: &RotateConfig) -> LogResult<Self> {
        if rotate.enabled {
            Self::rotating(path, rotate)
        } else {
            Self::file(path)
        }
    }

    /// Wrap an arbitrary sink
    pub fn new(kind: DestinationKind, sink: Box<dyn Sink>) -> Self {
        Self {
            inner: Arc::new(Shared {
                kind,
                slot: Mutex::new(Some(sink)),
            }),
        }
    }

    /// What this destination writes to
    pub fn kind(&self) -> &DestinationKind {
        &self.inner.kind
    }

    /// Whether [`close`](Self::close) already ran
    pub fn is_closed(&self) -> bool {
        self.inner.slot.lock().is_none()
    }

    /// Push buffered bytes down without closing. A closed destination has
    /// nothing to flush.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Flush`] on IO failure.
    pub fn flush(&self) -> LogResult<()> {
        let mut slot = self.inner.slot.lock();
        match slot.as_mut() {
            Some(sink) => sink
                .flush()
                .map_err(|e| LogError::flush(self.inner.kind.to_string(), e)),
            None => Ok(()),
        }
    }

    /// Flush and release the sink. The console is flushed but stays
    /// writable; files reject every later write.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Closed`] when called on a closed file destination
    /// and [`LogError::Flush`] on IO failure.
    pub fn close(&self) -> LogResult<()> {
        let target = || self.inner.kind.to_string();
        let mut slot = self.inner.slot.lock();
        let Some(sink) = slot.as_mut() else {
            return Err(LogError::Closed { target: target() });
        };
        if self.inner.kind == DestinationKind::Console {
            return sink.flush().map_err(|e| LogError::flush(target(), e));
        }
        let result = sink.close();
        *slot = None;
        result.map_err(|e| LogError::flush(target(), e))
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        // last owner gone: nobody can observe a close error anymore
        if let Some(mut sink) = self.slot.get_mut().take() {
            let _ = sink.close();
        }
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination")
            .field("kind", &self.inner.kind)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl<'a> MakeWriter<'a> for Destination {
    type Writer = DestinationWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        DestinationWriter {
            slot: self.inner.slot.lock(),
        }
    }
}

/// Writer holding the destination lock for the duration of one record
pub struct DestinationWriter<'a> {
    slot: MutexGuard<'a, Option<Box<dyn Sink>>>,
}

impl io::Write for DestinationWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.slot.as_mut() {
            Some(sink) => sink.write(buf),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "log destination is closed",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.slot.as_mut() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }
}
