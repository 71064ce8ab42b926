//! Multi-producer logger: any number of producer threads push [`LogJob`]s
//! into a bounded [`MpmcRing`], one drain thread renders and sinks them.
//!
//! Grounded on `examples/original_source/src/logger.cpp`'s `MTLogger`,
//! which additionally guards `init` with a mutex since, unlike `STLogger`,
//! more than one thread may race to (re)initialize it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use parking_lot::Mutex;

use crate::constants::DEFAULT_RING_CAPACITY;
use crate::job::LogJob;
use crate::level::LogLevel;
use crate::logger::shared::{drain_loop, SharedState};
use crate::ring::MpmcRing;
use crate::sink::Sink;

/// A logger safe for any number of concurrent producer threads.
pub struct MultiThreadedLogger {
    shared: SharedState,
    queue: MpmcRing<LogJob>,
    stop: AtomicBool,
    drain: Mutex<Option<JoinHandle<()>>>,
    /// Serializes `init`/`stop` against concurrent callers, matching
    /// `MTLogger::init`'s `std::lock_guard<std::mutex> lock(mutex_)`.
    lifecycle: Mutex<()>,
}

impl MultiThreadedLogger {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RING_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shared: SharedState::new(),
            queue: MpmcRing::new(capacity),
            stop: AtomicBool::new(true),
            drain: Mutex::new(None),
            lifecycle: Mutex::new(()),
        }
    }

    /// Stop any running drain thread, install `level`/`sink`, and start a
    /// fresh drain thread. Serialized against concurrent `init`/`stop`
    /// calls.
    pub fn init(&'static self, level: LogLevel, sink: Box<dyn Sink>) {
        let _guard = self.lifecycle.lock();

        self.stop_locked();

        self.shared.set_level(level);
        self.shared.set_sink(sink);
        self.stop.store(false, Ordering::Release);

        let handle = std::thread::spawn(move || {
            let tid = thread_tag();
            drain_loop(&self.shared, &self.stop, Some(tid), || self.queue.try_pop());
        });
        *self.drain.lock() = Some(handle);
    }

    /// Signal the drain thread to exit once the ring empties, and join
    /// it. Idempotent.
    pub fn stop(&'static self) {
        let _guard = self.lifecycle.lock();
        self.stop_locked();
    }

    fn stop_locked(&'static self) {
        self.stop.store(true, Ordering::Release);
        let handle = self.drain.lock().take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }

    /// Gate, capture, and enqueue one record. Below-threshold or
    /// not-running records are dropped; a full ring applies back-pressure
    /// by spinning the producer until the drain thread catches up, per
    /// the MPMC ring's `emplace` contract.
    pub fn log(&'static self, level: LogLevel, file: &'static str, line: u32, render: Box<dyn FnOnce() -> String + Send>) {
        if level < self.shared.level() {
            return;
        }
        if self.stop.load(Ordering::Acquire) {
            return;
        }

        let job = LogJob::new(level, file, line, render);
        self.queue.emplace(job);
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

impl Default for MultiThreadedLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// A stable per-thread tag for the rendered line's `[tid]` field. Real
/// OS thread ids aren't portably exposed as integers in stable Rust, so
/// this hashes `ThreadId`'s `Debug` form down to a `u64`, which is stable
/// for the thread's lifetime and distinct across live threads.
fn thread_tag() -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    std::thread::current().id().hash(&mut hasher);
    hasher.finish()
}
