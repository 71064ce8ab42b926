//! Asynchronous logging engine.
//!
//! A producer calls [`SingleThreadedLogger::log`] or
//! [`MultiThreadedLogger::log`] (or one of the [`log_info!`]-style
//! macros), which gates on the configured level, captures the message
//! body as a boxed render closure, and enqueues it into a bounded
//! lock-free ring. A dedicated drain thread pops jobs, renders the full
//! line (timestamp, level, thread id, `file:line`), and hands it to the
//! active [`Sink`] — `ConsoleSink`, `StandardFileSink`, or, on Linux with
//! the `io_uring` feature, `AsyncFileSink`.
//!
//! ## Module organization
//!
//! - `ring` — `SpscRing` / `MpmcRing`, the bounded lock-free queues
//! - `job` — `LogJob` / `LogLine`, the unit of deferred work
//! - `logger` — `SingleThreadedLogger` / `MultiThreadedLogger`
//! - `sink` — `ConsoleSink`, `StandardFileSink`, `AsyncFileSink`
//! - `uring` — the `io_uring`-backed async I/O ring (Linux + feature-gated)
//! - `singleton` — process-wide logger accessors
//!
//! ## Safety
//!
//! `SpscRing` and `SingleThreadedLogger::log` require a single producer
//! thread; nothing detects a violation. Use `MultiThreadedLogger` when
//! more than one thread may log concurrently.

pub mod constants;
pub mod error;
pub mod job;
pub mod level;
pub mod logger;
mod macros;
pub mod ring;
pub mod singleton;
pub mod sink;

#[cfg(all(target_os = "linux", feature = "io_uring"))]
pub mod uring;

pub use error::{LogError, Result};
pub use job::{LogJob, LogLine};
pub use level::LogLevel;
pub use logger::{MultiThreadedLogger, SingleThreadedLogger};
pub use ring::{MpmcRing, SpscRing};
pub use sink::{ConsoleSink, Sink, StandardFileSink};

#[cfg(all(target_os = "linux", feature = "io_uring"))]
pub use sink::AsyncFileSink;
