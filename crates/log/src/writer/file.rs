//! Plain file sink

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::Sink;

/// Append-only file behind a write buffer.
///
/// Writes are not flushed per record; call [`Sink::close`] (or let the
/// owning destination drop) to push them to disk.
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    /// Open `path` for appending, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns the IO error from opening the file.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Sink for FileSink {
    fn close(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()
    }
}
