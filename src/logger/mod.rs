//! Logger front end: level gate, job capture, lifecycle, drain thread.
//!
//! Two concrete loggers share the level/sink/drain-loop plumbing in
//! [`shared`] but otherwise stay separate types (one producer ring type
//! each), the same way `examples/original_source/src/logger.cpp` keeps
//! `STLogger` and `MTLogger` as sibling classes rather than forcing a
//! single generic one.

mod multi_threaded;
mod shared;
mod single_threaded;

pub use multi_threaded::MultiThreadedLogger;
pub use single_threaded::SingleThreadedLogger;
