//! Proportional-integral-derivative control

use loopkit_filters::clock::{Clock, StopWatch};
use loopkit_math::clamp_magnitude;

use crate::controller::{Controller, ErrorMeasure};

/// PID feedback on the error between setpoint and measurement.
///
/// Works for any [`ErrorMeasure`] setpoint, so the same controller closes a
/// loop on a linear position or, with angular error, on a heading. The
/// integral and derivative terms use the time measured by the clock since the
/// previous update. The first update after construction or [`reset`](Self::reset)
/// has no previous error, so it neither integrates nor differentiates: time the
/// controller spent idle never lands in the integral.
///
/// Optional limits:
///
/// - [`with_integral_range`](Self::with_integral_range): the integral only
///   accumulates while `|error|` is within the range
/// - [`with_integral_limit`](Self::with_integral_limit): the accumulated
///   integral is clamped to `±limit`
/// - [`with_output_limit`](Self::with_output_limit): the output is clamped to
///   `±limit`
#[derive(Debug, Clone)]
pub struct PidController<C = StopWatch> {
    clock: C,
    kp: f64,
    ki: f64,
    kd: f64,
    integral_range: Option<f64>,
    integral_limit: Option<f64>,
    output_limit: Option<f64>,
    integral: f64,
    last_error: Option<f64>,
}

impl PidController<StopWatch> {
    /// PID with the given gains on wall-clock time.
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self::with_clock(kp, ki, kd, StopWatch::new())
    }
}

impl<C: Clock> PidController<C> {
    /// PID with the given gains, measuring time with `clock`.
    pub fn with_clock(kp: f64, ki: f64, kd: f64, clock: C) -> Self {
        Self {
            clock,
            kp,
            ki,
            kd,
            integral_range: None,
            integral_limit: None,
            output_limit: None,
            integral: 0.0,
            last_error: None,
        }
    }

    /// Only integrate while `|error| <= range`.
    pub fn with_integral_range(mut self, range: f64) -> Self {
        self.integral_range = Some(range.abs());
        self
    }

    /// Clamp the accumulated integral to `±limit` error-seconds.
    pub fn with_integral_limit(mut self, limit: f64) -> Self {
        self.integral_limit = Some(limit.abs());
        self
    }

    /// Clamp the output to `±limit`.
    pub fn with_output_limit(mut self, limit: f64) -> Self {
        self.output_limit = Some(limit.abs());
        self
    }

    /// Proportional, integral and derivative gains.
    pub fn gains(&self) -> (f64, f64, f64) {
        (self.kp, self.ki, self.kd)
    }

    /// Accumulated error-seconds.
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Clear the integral and derivative history.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.last_error = None;
        self.clock.sample_and_reset();
    }

    fn integrates(&self, error: f64) -> bool {
        self.integral_range.is_none_or(|range| error.abs() <= range)
    }
}

impl<S: ErrorMeasure, C: Clock> Controller<S> for PidController<C> {
    fn calculate(&mut self, setpoint: S, measurement: S) -> f64 {
        let dt = self.clock.sample_and_reset();
        let error = S::error(setpoint, measurement);

        let derivative = match self.last_error {
            Some(previous) => {
                if self.integrates(error) {
                    self.integral += error * dt;
                    if let Some(limit) = self.integral_limit {
                        self.integral = clamp_magnitude(self.integral, limit);
                    }
                }
                if dt > 0.0 {
                    S::error_change(error, previous) / dt
                } else {
                    0.0
                }
            }
            None => 0.0,
        };
        self.last_error = Some(error);

        let output = self.kp * error + self.ki * self.integral + self.kd * derivative;
        match self.output_limit {
            Some(limit) => clamp_magnitude(output, limit),
            None => output,
        }
    }
}
