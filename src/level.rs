//! Log level enumeration.

use std::fmt;

/// Severity of a log record, totally ordered.
///
/// `Off` is a sentinel meaning "suppress everything": valid as a logger's
/// threshold (including the implicit threshold before the first `init`),
/// never valid for an emitted record.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
    /// Suppress everything. Also the logger's default threshold before
    /// `init` is first called, which happens to produce the correct
    /// behavior (drop everything) for the "uninitialized" case too.
    Off = 6,
}

impl LogLevel {
    /// Recover a `LogLevel` from its `#[repr(u8)]` discriminant, as stored
    /// in a logger's atomic threshold cell. Panics on an out-of-range
    /// value, which would indicate memory corruption of the atomic cell.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            5 => LogLevel::Fatal,
            6 => LogLevel::Off,
            _ => panic!("invalid LogLevel discriminant"),
        }
    }

    /// The fixed-width tag used in a rendered `LogLine`, e.g. `INFO`.
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::Off => "OFF",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
        assert!(LogLevel::Fatal < LogLevel::Off);
    }

    #[test]
    fn test_display() {
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(format!("{}", LogLevel::Fatal), "FATAL");
    }

    #[test]
    fn test_from_u8_round_trips() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
            LogLevel::Fatal,
            LogLevel::Off,
        ] {
            assert_eq!(LogLevel::from_u8(level as u8), level);
        }
    }
}
