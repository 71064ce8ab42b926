//! Process-wide logger accessors.
//!
//! Grounded on `examples/original_source`'s `Singleton<T>` CRTP base
//! (`Logger : public Singleton<Logger>`, `Logger::GetInst()`): one
//! lazily-constructed, process-lifetime instance per logger flavor. Rust
//! statics run no destructors, so — unlike the C++ original, whose
//! `Singleton` base tears itself down at process exit — shutdown here is
//! the caller's responsibility via an explicit `stop()` call; see
//! DESIGN.md.

use once_cell::sync::Lazy;

use crate::logger::{MultiThreadedLogger, SingleThreadedLogger};

static ST_LOGGER: Lazy<SingleThreadedLogger> = Lazy::new(SingleThreadedLogger::new);
static MT_LOGGER: Lazy<MultiThreadedLogger> = Lazy::new(MultiThreadedLogger::new);

/// The process-wide single-producer logger. Callable from any thread,
/// but `log` on the returned reference must only ever be invoked from
/// one thread at a time.
pub fn single_threaded_logger() -> &'static SingleThreadedLogger {
    &ST_LOGGER
}

/// The process-wide multi-producer logger. Safe to call `log` on from
/// any number of threads concurrently.
pub fn multi_threaded_logger() -> &'static MultiThreadedLogger {
    &MT_LOGGER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons_are_stable_addresses() {
        let a = single_threaded_logger() as *const SingleThreadedLogger;
        let b = single_threaded_logger() as *const SingleThreadedLogger;
        assert_eq!(a, b);

        let a = multi_threaded_logger() as *const MultiThreadedLogger;
        let b = multi_threaded_logger() as *const MultiThreadedLogger;
        assert_eq!(a, b);
    }
}
