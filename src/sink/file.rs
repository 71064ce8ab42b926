//! Synchronous file sink: direct blocking writes + `fsync` on flush.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;

use crate::constants::LOG_FILE_MODE;
use crate::error::{LogError, Result};
use crate::job::LogLine;
use crate::sink::{default_file_path, Sink};

/// Opens a file with `O_WRONLY | O_CREAT` plus `O_APPEND` or `O_TRUNC`
/// depending on `append`, mode `0600`, matching
/// `examples/original_source/src/log_sink.cpp` byte-for-byte. `write` is a
/// direct blocking syscall; `flush` calls `fsync`.
pub struct StandardFileSink {
    file: File,
    path: String,
}

impl StandardFileSink {
    /// Open `path` (or the default `YYYYMMDD_HHMMSS.log` in the current
    /// directory when `path` is empty) for logging.
    pub fn open(path: impl Into<String>, append: bool) -> Result<Self> {
        let mut path = path.into();
        if path.is_empty() {
            path = default_file_path();
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(append)
            .truncate(!append)
            .mode(LOG_FILE_MODE)
            .open(&path)
            .map_err(|e| LogError::file_open(path.clone(), e))?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Sink for StandardFileSink {
    fn write(&mut self, line: LogLine) {
        if let Err(e) = self.file.write_all(line.as_bytes()) {
            eprintln!("logring: write to {} failed: {}", self.path, e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.file.sync_all() {
            eprintln!("logring: fsync on {} failed: {}", self.path, e);
        }
    }
}

impl Drop for StandardFileSink {
    fn drop(&mut self) {
        self.flush();
    }
}
