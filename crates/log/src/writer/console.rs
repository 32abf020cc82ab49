//! Console sink

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::Sink;

/// Where the console sink writes
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConsoleTarget {
    /// Process standard output
    #[default]
    Stdout,
    /// Process standard error
    Stderr,
    /// In-memory buffer, for tests and embedding
    Capture(CaptureBuffer),
}

/// Shared in-memory buffer that collects console output
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Written lines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Whether nothing was written
    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    /// Drop everything written so far
    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl PartialEq for CaptureBuffer {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

impl fmt::Debug for CaptureBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureBuffer")
            .field("len", &self.bytes.lock().len())
            .finish()
    }
}

/// Console byte sink
pub enum ConsoleSink {
    /// Standard output
    Stdout(io::Stdout),
    /// Standard error
    Stderr(io::Stderr),
    /// In-memory capture
    Capture(CaptureBuffer),
}

impl ConsoleSink {
    /// Open the sink for a target
    pub fn new(target: &ConsoleTarget) -> Self {
        match target {
            ConsoleTarget::Stdout => Self::Stdout(io::stdout()),
            ConsoleTarget::Stderr => Self::Stderr(io::stderr()),
            ConsoleTarget::Capture(buffer) => Self::Capture(buffer.clone()),
        }
    }
}

impl Write for ConsoleSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(out) => out.write(buf),
            Self::Stderr(err) => err.write(buf),
            Self::Capture(buffer) => {
                buffer.bytes.lock().extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(out) => out.flush(),
            Self::Stderr(err) => err.flush(),
            Self::Capture(_) => Ok(()),
        }
    }
}

impl Sink for ConsoleSink {
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}
