//! Deferred log jobs: the unit of work moved through the rings.
//!
//! A [`LogJob`] is the Rust shape of spec's "conceptually `() -> LogLine`"
//! job: a boxed closure that renders only the *message body* (template +
//! args already captured by value), executed on the drain thread. The
//! drain thread then wraps that body with the timestamp, level tag,
//! thread id (MT only), and `file:line`, producing the final [`LogLine`].
//! This keeps the expensive `format!`-style expansion off the producer's
//! critical path — the producer's only cost is building the closure and
//! pushing it into the ring.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::level::LogLevel;

/// The fully rendered text of one log record, ending in `\n`.
pub type LogLine = String;

/// A deferred, single-shot rendering of a log record's message body.
///
/// Invariant: executing a job must not re-enter the logger (the render
/// closure must not call back into `log`/`init`/`stop`).
pub struct LogJob {
    level: LogLevel,
    file: &'static str,
    line: u32,
    render: Box<dyn FnOnce() -> String + Send>,
}

impl LogJob {
    /// Build a job. `render` produces only the message body; the header
    /// is assembled by [`LogJob::into_line`].
    pub fn new(
        level: LogLevel,
        file: &'static str,
        line: u32,
        render: Box<dyn FnOnce() -> String + Send>,
    ) -> Self {
        Self { level, file, line, render }
    }

    /// Execute the job, producing the final rendered line.
    ///
    /// `thread_tag` is `Some(id)` for the multi-threaded logger (whose
    /// format includes a thread-id field) and `None` for the
    /// single-threaded logger (whose format omits it), per spec's `§3`.
    pub fn into_line(self, thread_tag: Option<u64>) -> LogLine {
        let message = (self.render)();
        let unix_seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        match thread_tag {
            Some(tid) => format!(
                "[{}][{}][{}][{}:{}]: {}\n",
                tid, unix_seconds, self.level, self.file, self.line, message
            ),
            None => format!(
                "[{}][{}][{}:{}]: {}\n",
                unix_seconds, self.level, self.file, self.line, message
            ),
        }
    }
}
