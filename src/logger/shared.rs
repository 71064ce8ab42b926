//! Lifecycle and level/sink state shared by [`super::SingleThreadedLogger`]
//! and [`super::MultiThreadedLogger`].
//!
//! Grounded on `examples/original_source/src/logger.h`/`logger.cpp`'s
//! `Logger`/`LoggerBase` split: one struct owning `level_`, `sink_`, and
//! the stop flag, with `init`/`stop` composed the same way in both
//! concrete loggers rather than duplicated field-by-field.

use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::Mutex;

use crate::job::LogJob;
use crate::level::LogLevel;
use crate::sink::{ConsoleSink, Sink};

/// Level threshold plus the active sink, guarded independently so a
/// producer checking the level gate never contends with the drain
/// thread's sink access.
pub(super) struct SharedState {
    level: AtomicU8,
    sink: Mutex<Box<dyn Sink>>,
}

impl SharedState {
    /// Threshold starts at `Off`: nothing is emitted until `init` runs,
    /// which doubles as the "uninitialized" marker per spec's data model.
    pub(super) fn new() -> Self {
        Self { level: AtomicU8::new(LogLevel::Off as u8), sink: Mutex::new(Box::new(ConsoleSink::new())) }
    }

    pub(super) fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub(super) fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub(super) fn set_sink(&self, sink: Box<dyn Sink>) {
        *self.sink.lock() = sink;
    }

    pub(super) fn write_line(&self, line: String) {
        self.sink.lock().write(line);
    }

    pub(super) fn flush(&self) {
        self.sink.lock().flush();
    }
}

/// Pop-and-run the drain loop over any `try_pop`-shaped queue. Mirrors
/// `processLogTasks`'s `while (true) { if (stop && empty) break; ... }`
/// structure, with a cooperative yield (instead of a bare spin) on empty
/// iterations that haven't yet observed `stop`.
///
/// `thread_tag` is threaded straight into [`LogJob::into_line`]: `Some`
/// for the MT logger's per-record thread id, `None` for the ST logger.
pub(super) fn drain_loop<F>(shared: &SharedState, stop: &std::sync::atomic::AtomicBool, thread_tag: Option<u64>, mut try_pop: F)
where
    F: FnMut() -> Option<LogJob>,
{
    loop {
        match try_pop() {
            Some(job) => {
                let line = job.into_line(thread_tag);
                shared.write_line(line);
            }
            None => {
                if stop.load(Ordering::Acquire) {
                    break;
                }
                std::thread::yield_now();
            }
        }
    }
    shared.flush();
}
