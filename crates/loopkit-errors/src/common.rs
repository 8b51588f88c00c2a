//! Top-level error type and classification shared by all loopkit crates.

use core::fmt;

use crate::ValidationError;

/// Top-level error type wrapping every loopkit failure.
#[derive(Debug, thiserror::Error)]
pub enum LoopKitError {
    /// Rejected construction arguments
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration errors that are not a single bad field
    #[error("Configuration error: {0}")]
    Config(String),

    /// Background polling thread could not be started or stopped
    #[error("Poller error: {0}")]
    Poller(String),
}

impl LoopKitError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            LoopKitError::Validation(_) => ErrorCategory::Validation,
            LoopKitError::Config(_) => ErrorCategory::Config,
            LoopKitError::Poller(_) => ErrorCategory::Poller,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LoopKitError::Validation(e) => e.severity(),
            LoopKitError::Config(_) => ErrorSeverity::Error,
            LoopKitError::Poller(_) => ErrorSeverity::Critical,
        }
    }

    /// Check if this error is recoverable by rebuilding the component.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    /// Create a configuration error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        LoopKitError::Config(msg.into())
    }

    /// Create a poller error with a message.
    pub fn poller(msg: impl Into<String>) -> Self {
        LoopKitError::Poller(msg.into())
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Validation errors
    Validation = 0,
    /// Configuration errors
    Config = 1,
    /// Background poller errors
    Poller = 2,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "Validation"),
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::Poller => write!(f, "Poller"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, a background task is gone
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Validation.to_string(), "Validation");
        assert_eq!(ErrorCategory::Config.to_string(), "Config");
        assert_eq!(ErrorCategory::Poller.to_string(), "Poller");
    }

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::Error);
        assert!(ErrorSeverity::Error > ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning > ErrorSeverity::Info);
    }

    #[test]
    fn test_loopkit_error_category() {
        let err: LoopKitError = ValidationError::empty("group").into();
        assert_eq!(err.category(), ErrorCategory::Validation);

        let err = LoopKitError::config("test");
        assert_eq!(err.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_poller_error_not_recoverable() {
        assert!(!LoopKitError::poller("thread panicked").is_recoverable());
        assert!(LoopKitError::config("bad steps").is_recoverable());
    }
}
