//! Construction argument validation errors.

use core::fmt;

use crate::common::ErrorSeverity;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Value out of range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Field name
        field: String,
        /// The invalid value
        value: String,
        /// Minimum allowed value
        min: String,
        /// Maximum allowed value
        max: String,
    },

    /// Value is NaN or infinite where a finite number is required
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Field name
        field: String,
        /// The invalid value
        value: f64,
    },

    /// A collection that must hold at least one element is empty
    #[error("{0} must contain at least one element")]
    Empty(String),

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl ValidationError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    /// Create an out of range error for a numeric value.
    pub fn out_of_range<T: fmt::Debug>(field: impl Into<String>, value: T, min: T, max: T) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            value: format!("{:?}", value),
            min: format!("{:?}", min),
            max: format!("{:?}", max),
        }
    }

    /// Create a non-finite value error.
    pub fn non_finite(field: impl Into<String>, value: f64) -> Self {
        ValidationError::NonFinite {
            field: field.into(),
            value,
        }
    }

    /// Create an empty collection error.
    pub fn empty(what: impl Into<String>) -> Self {
        ValidationError::Empty(what.into())
    }

    /// Create a constraint violation error.
    pub fn constraint(msg: impl Into<String>) -> Self {
        ValidationError::Constraint(msg.into())
    }

    /// Reject NaN and infinite values, passing finite ones through.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFinite`] when `value` is not finite.
    pub fn require_finite(field: &str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::non_finite(field, value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_out_of_range() {
        let err = ValidationError::out_of_range("period", -0.5_f64, 0.0, f64::INFINITY);
        let msg = err.to_string();
        assert!(msg.contains("period"));
        assert!(msg.contains("-0.5"));
    }

    #[test]
    fn test_validation_error_empty() {
        let err = ValidationError::empty("controller group");
        assert_eq!(
            err.to_string(),
            "controller group must contain at least one element"
        );
    }

    #[test]
    fn test_require_finite() {
        assert_eq!(ValidationError::require_finite("kp", 1.5), Ok(1.5));
        assert!(ValidationError::require_finite("kp", f64::NAN).is_err());
        assert!(ValidationError::require_finite("kp", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validation_error_severity() {
        assert_eq!(
            ValidationError::constraint("steps").severity(),
            ErrorSeverity::Error
        );
    }

    #[test]
    fn test_validation_error_is_std_error() {
        let err = ValidationError::empty("test");
        let _: &dyn std::error::Error = &err;
    }
}
