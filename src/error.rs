//! Error types for the logring engine.

use thiserror::Error;

/// Result type alias for logring operations.
pub type Result<T> = std::result::Result<T, LogError>;

/// Construction-time and configuration failures.
///
/// Per the propagation policy: construction-time errors are fatal and
/// surfaced through `Result`; runtime I/O errors inside a sink are never
/// turned into a `LogError` — they are reported to stderr and swallowed,
/// since a log producer cannot meaningfully recover from a logging failure.
#[derive(Error, Debug)]
pub enum LogError {
    /// I/O errors from sink construction (file open/seek, ring creation).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ring buffer capacity was not a valid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration problem.
        message: String,
    },

    /// The async I/O ring could not be constructed (queue creation failed).
    #[error("ring construction failed: {message}")]
    RingConstruction {
        /// Description of the construction failure.
        message: String,
    },

    /// The running kernel lacks a feature this ring configuration requires
    /// (e.g. SQPOLL without fixed files on an old kernel).
    #[error("kernel feature mismatch: {message}")]
    KernelFeatureMismatch {
        /// Description of the missing feature.
        message: String,
    },

    /// A file sink could not open or position its backing file.
    #[error("failed to open log file {path}: {source}")]
    FileOpen {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Generic error for unexpected conditions.
    #[error("unexpected error: {message}")]
    Unexpected {
        /// Description of the unexpected condition.
        message: String,
    },
}

impl LogError {
    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig { message: message.into() }
    }

    /// Create a new ring construction error.
    pub fn ring_construction(message: impl Into<String>) -> Self {
        Self::RingConstruction { message: message.into() }
    }

    /// Create a new kernel feature mismatch error.
    pub fn kernel_feature_mismatch(message: impl Into<String>) -> Self {
        Self::KernelFeatureMismatch { message: message.into() }
    }

    /// Create a new file-open error.
    pub fn file_open(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileOpen { path: path.into(), source }
    }

    /// Create a new unexpected-condition error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected { message: message.into() }
    }

    /// Whether construction may succeed on retry (vs. a structural
    /// misconfiguration the caller must fix).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::FileOpen { .. })
    }
}

/// Convenience macro for creating configuration errors.
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::error::LogError::config(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LogError::config("capacity must be a power of two");
        assert!(matches!(err, LogError::InvalidConfig { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_classification() {
        let io_err = LogError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(io_err.is_recoverable());

        let kfm = LogError::kernel_feature_mismatch("SQPOLL requires fixed files");
        assert!(!kfm.is_recoverable());
    }

    #[test]
    fn test_error_macro() {
        let err = config_error!("bad value: {}", 42);
        assert!(matches!(err, LogError::InvalidConfig { .. }));
    }
}
