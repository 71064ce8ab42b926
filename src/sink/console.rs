//! Console sink: writes rendered lines to stdout.

use std::io::{self, BufWriter, Write};

use crate::job::LogLine;
use crate::sink::Sink;

/// Writes every line to stdout through a small buffer, matching the
/// reference `ConsoleSink`'s "write, flush calls fflush" contract.
pub struct ConsoleSink {
    out: BufWriter<io::Stdout>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { out: BufWriter::new(io::stdout()) }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, line: LogLine) {
        // stdout write failures have no recovery path for a log sink;
        // mirror the reference implementation's fire-and-forget write.
        let _ = self.out.write_all(line.as_bytes());
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }
}

impl Drop for ConsoleSink {
    fn drop(&mut self) {
        self.flush();
    }
}
