//! Serializable controller gains
//!
//! Gains are tuned offline and loaded from configuration, so each type
//! validates itself before building a controller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use loopkit_errors::ValidationError;
use loopkit_filters::clock::{Clock, StopWatch};

use crate::feedforward::MotorFeedforward;
use crate::pid::PidController;

fn require_positive(field: &str, value: Option<f64>) -> Result<(), ValidationError> {
    if let Some(value) = value {
        let value = ValidationError::require_finite(field, value)?;
        if value <= 0.0 {
            return Err(ValidationError::out_of_range(field, value, 0.0, f64::MAX));
        }
    }
    Ok(())
}

/// [`PidController`] settings.
///
/// ```
/// use loopkit_control::PidGains;
///
/// let gains: PidGains = serde_json::from_str(r#"{"kp":1.2,"kd":0.05,"output_limit":12.0}"#)?;
/// assert_eq!(gains.ki, 0.0);
/// assert!(gains.integral_range.is_none());
///
/// let _pid = gains.build()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PidGains {
    /// Proportional gain
    pub kp: f64,
    /// Integral gain
    pub ki: f64,
    /// Derivative gain
    pub kd: f64,
    /// Only integrate while `|error|` is within this range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integral_range: Option<f64>,
    /// Clamp the accumulated integral to `±integral_limit`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integral_limit: Option<f64>,
    /// Clamp the output to `±output_limit`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_limit: Option<f64>,
}

impl PidGains {
    /// Check every gain is finite and the range and limits, when present, are
    /// positive.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require_finite("kp", self.kp)?;
        ValidationError::require_finite("ki", self.ki)?;
        ValidationError::require_finite("kd", self.kd)?;
        require_positive("integral_range", self.integral_range)?;
        require_positive("integral_limit", self.integral_limit)?;
        require_positive("output_limit", self.output_limit)
    }

    /// Build a controller on wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if [`validate`](Self::validate) fails.
    pub fn build(&self) -> Result<PidController, ValidationError> {
        self.build_with_clock(StopWatch::new())
    }

    /// Build a controller timed by `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if [`validate`](Self::validate) fails.
    pub fn build_with_clock<C: Clock>(&self, clock: C) -> Result<PidController<C>, ValidationError> {
        self.validate()?;
        debug!(kp = self.kp, ki = self.ki, kd = self.kd, "building PID controller");

        let mut pid = PidController::with_clock(self.kp, self.ki, self.kd, clock);
        if let Some(range) = self.integral_range {
            pid = pid.with_integral_range(range);
        }
        if let Some(limit) = self.integral_limit {
            pid = pid.with_integral_limit(limit);
        }
        if let Some(limit) = self.output_limit {
            pid = pid.with_output_limit(limit);
        }
        Ok(pid)
    }
}

/// [`MotorFeedforward`] settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorFeedforwardGains {
    /// Output needed to overcome static friction
    pub ks: f64,
    /// Output per unit of velocity
    pub kv: f64,
    /// Output per unit of acceleration
    pub ka: f64,
}

impl MotorFeedforwardGains {
    /// Check every gain is finite.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFinite`] for the first non-finite gain.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require_finite("ks", self.ks)?;
        ValidationError::require_finite("kv", self.kv)?;
        ValidationError::require_finite("ka", self.ka)?;
        Ok(())
    }

    /// Build a model on wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if [`validate`](Self::validate) fails.
    pub fn build(&self) -> Result<MotorFeedforward, ValidationError> {
        self.build_with_clock(StopWatch::new())
    }

    /// Build a model whose acceleration estimate is timed by `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if [`validate`](Self::validate) fails.
    pub fn build_with_clock<C: Clock>(
        &self,
        clock: C,
    ) -> Result<MotorFeedforward<C>, ValidationError> {
        self.validate()?;
        debug!(ks = self.ks, kv = self.kv, ka = self.ka, "building motor feedforward");
        Ok(MotorFeedforward::with_clock(self.ks, self.kv, self.ka, clock))
    }
}
