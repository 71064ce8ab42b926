//! Convenience logging macros built on the process-wide multi-threaded
//! logger, the way `log`/`tracing` layer `info!`/`warn!`/etc. on top of
//! their core dispatch call. The C++ original's analogue is
//! `examples/original_source/src/logger.h`'s `SHLOG_INFO(format, ...)`
//! family, which expands to `Logger::GetInst().log<Level>(__LINE__,
//! format, args...)`.
//!
//! `format!`'s expansion is deferred into the boxed render closure, so
//! argument formatting happens on the drain thread, not the call site.

/// Log at [`crate::level::LogLevel::Trace`] through the multi-threaded
/// singleton.
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        $crate::singleton::multi_threaded_logger().log(
            $crate::level::LogLevel::Trace,
            file!(),
            line!(),
            Box::new(move || format!($($arg)*)),
        )
    };
}

/// Log at [`crate::level::LogLevel::Debug`].
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::singleton::multi_threaded_logger().log(
            $crate::level::LogLevel::Debug,
            file!(),
            line!(),
            Box::new(move || format!($($arg)*)),
        )
    };
}

/// Log at [`crate::level::LogLevel::Info`].
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::singleton::multi_threaded_logger().log(
            $crate::level::LogLevel::Info,
            file!(),
            line!(),
            Box::new(move || format!($($arg)*)),
        )
    };
}

/// Log at [`crate::level::LogLevel::Warn`].
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::singleton::multi_threaded_logger().log(
            $crate::level::LogLevel::Warn,
            file!(),
            line!(),
            Box::new(move || format!($($arg)*)),
        )
    };
}

/// Log at [`crate::level::LogLevel::Error`].
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::singleton::multi_threaded_logger().log(
            $crate::level::LogLevel::Error,
            file!(),
            line!(),
            Box::new(move || format!($($arg)*)),
        )
    };
}

/// Log at [`crate::level::LogLevel::Fatal`].
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {
        $crate::singleton::multi_threaded_logger().log(
            $crate::level::LogLevel::Fatal,
            file!(),
            line!(),
            Box::new(move || format!($($arg)*)),
        )
    };
}
