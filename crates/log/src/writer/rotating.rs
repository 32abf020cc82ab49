//! Rotating file sink
//!
//! Size threshold, backup count and compression are delegated to
//! `file-rotate`. Backups older than `max_age_days` are swept when the sink
//! opens, after every rotation and when it closes.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use file_rotate::compression::Compression;
use file_rotate::suffix::{AppendTimestamp, FileLimit};
use file_rotate::{ContentLimit, FileRotate};

use super::Sink;
use crate::config::RotateConfig;

/// File that rotates once it grows past the configured size
pub struct RotatingFileSink {
    inner: FileRotate<AppendTimestamp>,
    max_age: Option<Duration>,
    max_size: u64,
    // bytes in the active file, mirrors the rotation trigger
    written: u64,
}

impl RotatingFileSink {
    /// Bind to `path` with the given limits. A zero limit disables that
    /// limit. Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns the IO error if `path` has no file name, its directory cannot
    /// be created, or the active file cannot be opened for appending.
    pub fn open(path: &Path, rotate: &RotateConfig) -> io::Result<Self> {
        let Some(parent) = path.parent().filter(|_| path.file_name().is_some()) else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "log path has no file name",
            ));
        };
        fs::create_dir_all(parent)?;
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?
            .metadata()?
            .len();

        let file_limit = match rotate.max_backups {
            0 => FileLimit::Unlimited,
            n => FileLimit::MaxFiles(n),
        };
        let content_limit = match usize::try_from(rotate.max_size_bytes) {
            Ok(0) => ContentLimit::None,
            Ok(bytes) => ContentLimit::BytesSurpassed(bytes),
            Err(_) => ContentLimit::BytesSurpassed(usize::MAX),
        };
        let compression = if rotate.compress {
            Compression::OnRotate(0)
        } else {
            Compression::None
        };

        let inner = FileRotate::new(
            path,
            AppendTimestamp::default(file_limit),
            content_limit,
            compression,
            #[cfg(unix)]
            None,
        );

        let mut sink = Self {
            inner,
            max_age: (rotate.max_age_days > 0).then(|| rotate.max_age()),
            max_size: rotate.max_size_bytes,
            written,
        };
        sink.prune_expired();
        Ok(sink)
    }

    /// Rotated-out files still on disk, oldest first
    pub fn backups(&mut self) -> Vec<PathBuf> {
        self.inner
            .log_paths()
            .into_iter()
            .filter(|path| path.exists())
            .collect()
    }

    fn prune_expired(&mut self) {
        let Some(max_age) = self.max_age else {
            return;
        };
        let now = SystemTime::now();
        for path in self.inner.log_paths() {
            let expired = fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .is_some_and(|age| age > max_age);
            if expired {
                let _ = fs::remove_file(&path);
            }
        }
    }
}

impl Write for RotatingFileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // file-rotate rotates before a write once the active file is past the limit
        let rotates = self.max_size > 0 && self.written > self.max_size;
        let n = self.inner.write(buf)?;
        if rotates {
            self.written = n as u64;
            self.prune_expired();
        } else {
            self.written += n as u64;
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Sink for RotatingFileSink {
    fn close(&mut self) -> io::Result<()> {
        self.inner.flush()?;
        self.prune_expired();
        Ok(())
    }
}
