//! io_uring-backed file sink: batched async writes with a fixed,
//! pre-registered file descriptor.
//!
//! Grounded on `examples/original_source/src/log_sink.cpp`'s
//! `UringFileSink`, which opens the file, registers its descriptor as
//! fixed file index 0, and logs via `aio_.write_async(msg, -1, 0)` /
//! `aio_.fsync_and_wait(0)`.

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;

use crate::constants::LOG_FILE_MODE;
use crate::error::{LogError, Result};
use crate::job::LogLine;
use crate::sink::{default_file_path, Sink};
use crate::uring::{AsyncIoRing, AsyncIoRingConfig};

/// The fixed-file index the backing descriptor is registered under.
/// This sink only ever owns one file, so it's always index 0.
const FIXED_INDEX: i32 = 0;

/// Async file sink. Opens its own file, registers it as fixed file 0 on
/// an [`AsyncIoRing`] configured with SQPOLL, and tracks the write
/// offset itself since a fixed-file write bypasses the kernel's
/// `O_APPEND` cursor.
pub struct AsyncFileSink {
    ring: AsyncIoRing,
    path: String,
    offset: i64,
    // Kept open only to hold the fd registered; never read/written
    // directly once registration succeeds.
    _file: File,
}

impl AsyncFileSink {
    /// Open `path` (or the default timestamped path when empty), seek to
    /// the end when `append`, and register the descriptor as fixed
    /// file 0 on a freshly constructed ring.
    pub fn open(path: impl Into<String>, append: bool) -> Result<Self> {
        let mut path = path.into();
        if path.is_empty() {
            path = default_file_path();
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(append)
            .truncate(!append)
            .mode(LOG_FILE_MODE)
            .open(&path)
            .map_err(|e| LogError::file_open(path.clone(), e))?;

        let offset = if append {
            file.seek(SeekFrom::End(0)).map_err(|e| LogError::file_open(path.clone(), e))? as i64
        } else {
            0
        };

        let mut ring = AsyncIoRing::new(AsyncIoRingConfig::default())?;
        ring.register_fds(&[file.as_raw_fd()])?;

        Ok(Self { ring, path, offset, _file: file })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Sink for AsyncFileSink {
    fn write(&mut self, line: LogLine) {
        let bytes = line.into_bytes();
        let len = bytes.len() as i64;
        self.ring.write_async(bytes, self.offset, FIXED_INDEX);
        self.offset += len;
    }

    fn flush(&mut self) {
        self.ring.fsync_and_wait(FIXED_INDEX, false);
    }
}

impl Drop for AsyncFileSink {
    fn drop(&mut self) {
        self.flush();
    }
}
