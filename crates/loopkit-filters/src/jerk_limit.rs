//! Jerk-limited angular motion
//!
//! [`AngleJerkLimit`] profiles a stream of target angles the way an S-curve
//! motion profile would: the rate the output moves at is bounded by the
//! acceleration limit, and the rate that rate may change is bounded by the jerk
//! limit. Each call is integrated over a fixed number of sub-steps, and when
//! the output is wound up it aims for where it would coast to a stop so that it
//! does not overshoot the target.

use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use tracing::debug;

use loopkit_errors::ValidationError;
use loopkit_math::{Angle, clamp_magnitude};

use crate::clock::{Clock, StopWatch};
use crate::filter::Filter;

/// Sub-steps per call unless configured otherwise.
pub const DEFAULT_STEPS: NonZeroU32 = NonZeroU32::MIN.saturating_add(63);

/// Angle filter bounding the output's rate of motion and the change of that
/// rate.
///
/// A limit that is zero or negative disables that constraint. With both
/// disabled the filter reaches the target on the first call.
///
/// ```
/// use loopkit_filters::clock::FixedStepClock;
/// use loopkit_filters::jerk_limit::DEFAULT_STEPS;
/// use loopkit_filters::{AngleJerkLimit, Filter};
/// use loopkit_math::Angle;
///
/// let mut filter = AngleJerkLimit::with_clock(
///     std::f64::consts::TAU,
///     0.0,
///     DEFAULT_STEPS,
///     FixedStepClock::new(0.02),
/// );
/// let output = filter.get(Angle::from_degrees(90.0));
/// assert!((output.to_degrees() - 7.2).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct AngleJerkLimit<C = StopWatch> {
    clock: C,
    accel_limit: f64,
    jerk_limit: f64,
    steps: NonZeroU32,
    output: Angle,
    accel: f64,
}

impl AngleJerkLimit<StopWatch> {
    /// Create a filter integrating over [`DEFAULT_STEPS`] sub-steps per call.
    pub fn new(accel_limit: f64, jerk_limit: f64) -> Self {
        Self::with_steps(accel_limit, jerk_limit, DEFAULT_STEPS)
    }

    /// Create a filter integrating over `steps` sub-steps per call.
    pub fn with_steps(accel_limit: f64, jerk_limit: f64, steps: NonZeroU32) -> Self {
        Self::with_clock(accel_limit, jerk_limit, steps, StopWatch::new())
    }
}

impl<C: Clock> AngleJerkLimit<C> {
    /// Create a filter measuring elapsed time with `clock`.
    pub fn with_clock(accel_limit: f64, jerk_limit: f64, steps: NonZeroU32, clock: C) -> Self {
        Self {
            clock,
            accel_limit,
            jerk_limit,
            steps,
            output: Angle::ZERO,
            accel: 0.0,
        }
    }

    /// The most recent output.
    pub fn output(&self) -> Angle {
        self.output
    }

    /// Current rate of motion of the output, in rad/s.
    pub fn acceleration(&self) -> f64 {
        self.accel
    }

    /// Sub-steps per call.
    pub fn steps(&self) -> NonZeroU32 {
        self.steps
    }

    /// Restart from rest at `initial`.
    ///
    /// The clock is also reset so the next call does not integrate over the
    /// time spent before the reset.
    pub fn reset(&mut self, initial: Angle) {
        self.output = initial;
        self.accel = 0.0;
        self.clock.sample_and_reset();
    }

    fn step(&mut self, target: Angle, dt: f64) {
        if self.jerk_limit > 0.0 {
            let max_change = dt * self.jerk_limit;
            // time needed to bring the current rate back to zero
            let windup = self.accel.abs() / self.jerk_limit;

            if windup < dt {
                let wanted = target.velocity_radians(self.output, dt) - self.accel;
                self.accel += clamp_magnitude(wanted, max_change);
            } else {
                let future = self.output.add_radians(0.5 * self.accel * (dt + windup));
                let wanted = target.velocity_radians(future, windup);
                self.accel += clamp_magnitude(wanted, max_change);
            }
        } else {
            self.accel = target.velocity_radians(self.output, dt);
        }

        if self.accel_limit > 0.0 {
            self.accel = clamp_magnitude(self.accel, self.accel_limit);
        }

        self.output = self.output.add_radians(dt * self.accel);
    }
}

impl<C: Clock> Filter<Angle> for AngleJerkLimit<C> {
    fn get(&mut self, target: Angle) -> Angle {
        let steps = self.steps.get();
        let dt = self.clock.sample_and_reset() / f64::from(steps);

        // No time has passed, so there is nothing to integrate.
        if dt <= 0.0 {
            return self.output;
        }

        for _ in 0..steps {
            self.step(target, dt);
        }

        self.output
    }
}

fn default_steps() -> u32 {
    DEFAULT_STEPS.get()
}

/// Serializable [`AngleJerkLimit`] settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JerkLimitConfig {
    /// Maximum rate of motion in rad/s, `<= 0` to disable
    pub accel_limit: f64,
    /// Maximum change of that rate in rad/s², `<= 0` to disable
    pub jerk_limit: f64,
    /// Integration sub-steps per call
    #[serde(default = "default_steps")]
    pub steps: u32,
}

impl Default for JerkLimitConfig {
    fn default() -> Self {
        Self {
            accel_limit: 0.0,
            jerk_limit: 0.0,
            steps: default_steps(),
        }
    }
}

impl JerkLimitConfig {
    /// Check both limits are finite and `steps` is at least one.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] describing the first invalid field.
    pub fn validate(&self) -> Result<NonZeroU32, ValidationError> {
        ValidationError::require_finite("accel_limit", self.accel_limit)?;
        ValidationError::require_finite("jerk_limit", self.jerk_limit)?;
        NonZeroU32::new(self.steps)
            .ok_or_else(|| ValidationError::out_of_range("steps", self.steps, 1, u32::MAX))
    }

    /// Build the filter on a wall-clock [`StopWatch`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if [`validate`](Self::validate) fails.
    pub fn build(&self) -> Result<AngleJerkLimit, ValidationError> {
        self.build_with_clock(StopWatch::new())
    }

    /// Build the filter on the given clock.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if [`validate`](Self::validate) fails.
    pub fn build_with_clock<C: Clock>(&self, clock: C) -> Result<AngleJerkLimit<C>, ValidationError> {
        let steps = self.validate()?;
        debug!(
            accel_limit = self.accel_limit,
            jerk_limit = self.jerk_limit,
            steps = steps.get(),
            "building jerk limit filter"
        );
        Ok(AngleJerkLimit::with_clock(
            self.accel_limit,
            self.jerk_limit,
            steps,
            clock,
        ))
    }
}
