//! Single-producer logger: one producer thread pushes [`LogJob`]s into a
//! bounded [`SpscRing`], a dedicated drain thread renders and sinks them.
//!
//! Grounded on `examples/original_source/src/logger.cpp`'s `STLogger`:
//! `init` stops any running drain thread, swaps in the new level/sink,
//! clears the stop flag, and spawns a fresh drain thread; `stop` is
//! idempotent and joins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use parking_lot::Mutex;

use crate::constants::DEFAULT_RING_CAPACITY;
use crate::job::LogJob;
use crate::level::LogLevel;
use crate::logger::shared::{drain_loop, SharedState};
use crate::ring::SpscRing;
use crate::sink::Sink;

/// A logger safe for exactly one producer thread at a time.
///
/// # Safety contract
/// `log` must not be called concurrently from more than one thread — the
/// backing [`SpscRing`] is single-producer. `init`/`stop`/`set_level`/
/// `set_sink` may be called from any thread (they touch shared state, not
/// the ring's producer side), but are not reentrant: calling `init` from
/// inside a `render` closure would deadlock joining the drain thread from
/// itself.
pub struct SingleThreadedLogger {
    shared: SharedState,
    queue: SpscRing<LogJob>,
    stop: AtomicBool,
    drain: Mutex<Option<JoinHandle<()>>>,
}

impl SingleThreadedLogger {
    /// Construct a logger with the default ring capacity. Not running
    /// until `init` is called.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RING_CAPACITY)
    }

    /// Construct a logger whose ring holds `capacity - 1` live jobs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shared: SharedState::new(),
            queue: SpscRing::new(capacity),
            stop: AtomicBool::new(true),
            drain: Mutex::new(None),
        }
    }

    /// Stop any running drain thread, install `level`/`sink`, and start a
    /// fresh drain thread. Matches `STLogger::init`'s implicit-stop
    /// re-entry behavior.
    pub fn init(&'static self, level: LogLevel, sink: Box<dyn Sink>) {
        self.stop();

        self.shared.set_level(level);
        self.shared.set_sink(sink);
        self.stop.store(false, Ordering::Release);

        let handle = std::thread::spawn(move || {
            drain_loop(&self.shared, &self.stop, None, || self.queue.try_pop());
        });
        *self.drain.lock() = Some(handle);
    }

    /// Signal the drain thread to exit once the ring empties, and join
    /// it. Idempotent: calling `stop` twice, or before any `init`, is a
    /// no-op on the second/only call.
    pub fn stop(&'static self) {
        self.stop.store(true, Ordering::Release);
        let handle = self.drain.lock().take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }

    /// Gate, capture, and enqueue one record. Dropped (with a stderr
    /// notice) if the ring is full or the logger isn't running.
    pub fn log(&'static self, level: LogLevel, file: &'static str, line: u32, render: Box<dyn FnOnce() -> String + Send>) {
        if level < self.shared.level() {
            return;
        }
        if self.stop.load(Ordering::Acquire) {
            return;
        }

        let job = LogJob::new(level, file, line, render);
        if !self.queue.try_emplace(job) {
            eprintln!("logring: ring full, dropping record ({file}:{line})");
        }
    }

    pub fn set_level(&self, level: LogLevel) {
        self.shared.set_level(level);
    }

    pub fn level(&self) -> LogLevel {
        self.shared.level()
    }

    pub fn set_sink(&self, sink: Box<dyn Sink>) {
        self.shared.set_sink(sink);
    }
}

impl Default for SingleThreadedLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::ConsoleSink;
    use std::sync::Mutex as StdMutex;

    struct VecSink(std::sync::Arc<StdMutex<Vec<String>>>);
    impl Sink for VecSink {
        fn write(&mut self, line: String) {
            self.0.lock().unwrap().push(line);
        }
        fn flush(&mut self) {}
    }

    #[test]
    fn test_level_gate_suppresses_below_threshold() {
        let logger: &'static SingleThreadedLogger = Box::leak(Box::new(SingleThreadedLogger::new()));
        let records = std::sync::Arc::new(StdMutex::new(Vec::new()));
        logger.init(LogLevel::Error, Box::new(VecSink(records.clone())));

        logger.log(LogLevel::Info, file!(), line!(), Box::new(|| "suppressed".into()));
        logger.log(LogLevel::Error, file!(), line!(), Box::new(|| "kept".into()));
        logger.stop();

        let lines = records.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("kept"));
    }

    #[test]
    fn test_reinit_routes_to_new_sink() {
        let logger: &'static SingleThreadedLogger = Box::leak(Box::new(SingleThreadedLogger::new()));
        let first = std::sync::Arc::new(StdMutex::new(Vec::new()));
        logger.init(LogLevel::Trace, Box::new(VecSink(first.clone())));
        logger.log(LogLevel::Info, file!(), line!(), Box::new(|| "one".into()));
        logger.stop();

        let second = std::sync::Arc::new(StdMutex::new(Vec::new()));
        logger.init(LogLevel::Trace, Box::new(VecSink(second.clone())));
        logger.log(LogLevel::Info, file!(), line!(), Box::new(|| "two".into()));
        logger.stop();

        assert_eq!(first.lock().unwrap().len(), 1);
        assert_eq!(second.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_log_before_init_is_dropped() {
        let logger: &'static SingleThreadedLogger = Box::leak(Box::new(SingleThreadedLogger::new()));
        // Never initialized: threshold is Off, drain thread never started.
        logger.log(LogLevel::Fatal, file!(), line!(), Box::new(|| "nope".into()));
        assert!(logger.queue.empty());
    }

    #[test]
    fn test_default_sink_is_console() {
        let logger = SingleThreadedLogger::new();
        logger.set_sink(Box::new(ConsoleSink::new()));
    }
}
