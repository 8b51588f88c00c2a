//! Rate-of-change limiters
//!
//! Each limiter restricts how far its output may move per second of elapsed
//! time, so a step in the input becomes a ramp. A rate that is zero or negative
//! disables the limit and the input passes straight through.
//!
//! - [`RateLimit`]: scalar, units per second
//! - [`AngleRateLimit`]: angle, radians per second along the shortest path
//! - [`VectorRateLimit`]: 2D vector, bounds the length of the change
//!
//! Every limiter starts at zero.

use loopkit_math::{Angle, Vec2, clamp_magnitude};

use crate::clock::{Clock, StopWatch};
use crate::filter::Filter;

/// Scalar slew-rate limiter.
///
/// ```
/// use loopkit_filters::clock::FixedStepClock;
/// use loopkit_filters::{Filter, RateLimit};
///
/// // 0.5 units per second at 50 Hz is 0.01 per call
/// let mut limit = RateLimit::with_clock(0.5, FixedStepClock::new(0.02));
/// assert!((limit.get(1.0) - 0.01).abs() < 1e-12);
/// assert!((limit.get(1.0) - 0.02).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct RateLimit<C = StopWatch> {
    clock: C,
    rate: f64,
    last: f64,
}

impl RateLimit<StopWatch> {
    /// Limit the output to `rate` units per second.
    pub fn new(rate: f64) -> Self {
        Self::with_clock(rate, StopWatch::new())
    }

    /// A limiter that never limits.
    pub fn unlimited() -> Self {
        Self::new(0.0)
    }
}

impl<C: Clock> RateLimit<C> {
    /// Limit the output to `rate` units per second, measured with `clock`.
    pub fn with_clock(rate: f64, clock: C) -> Self {
        Self {
            clock,
            rate,
            last: 0.0,
        }
    }

    /// Maximum change per second.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// The most recent output.
    pub fn last(&self) -> f64 {
        self.last
    }

    /// Jump the output to `value`.
    pub fn reset(&mut self, value: f64) {
        self.last = value;
        self.clock.sample_and_reset();
    }
}

impl<C: Clock> Filter<f64> for RateLimit<C> {
    fn get(&mut self, next: f64) -> f64 {
        let dt = self.clock.sample_and_reset();

        if self.rate > 0.0 {
            self.last += clamp_magnitude(next - self.last, self.rate * dt);
        } else {
            self.last = next;
        }

        self.last
    }
}

/// Angular slew-rate limiter.
///
/// The output turns toward the input along the shortest path, so a limiter
/// sitting at 170° and fed -170° moves through 180°, not through 0°.
#[derive(Debug, Clone)]
pub struct AngleRateLimit<C = StopWatch> {
    clock: C,
    rate: f64,
    last: Angle,
}

impl AngleRateLimit<StopWatch> {
    /// Limit the output to `rate` radians per second.
    pub fn new(rate: f64) -> Self {
        Self::with_clock(rate, StopWatch::new())
    }
}

impl<C: Clock> AngleRateLimit<C> {
    /// Limit the output to `rate` radians per second, measured with `clock`.
    pub fn with_clock(rate: f64, clock: C) -> Self {
        Self {
            clock,
            rate,
            last: Angle::ZERO,
        }
    }

    /// The most recent output.
    pub fn last(&self) -> Angle {
        self.last
    }

    /// Jump the output to `value`.
    pub fn reset(&mut self, value: Angle) {
        self.last = value;
        self.clock.sample_and_reset();
    }
}

impl<C: Clock> Filter<Angle> for AngleRateLimit<C> {
    fn get(&mut self, next: Angle) -> Angle {
        let dt = self.clock.sample_and_reset();

        if self.rate > 0.0 {
            let distance = self.last.distance_to(next).to_radians();
            self.last = self
                .last
                .add_radians(clamp_magnitude(distance, self.rate * dt));
        } else {
            self.last = next;
        }

        self.last
    }
}

/// Vector slew-rate limiter.
///
/// The change is limited by length, so the output moves toward the input in a
/// straight line instead of each axis ramping independently. Use an
/// [`XYFilter`](crate::XYFilter) of two [`RateLimit`]s for per-axis limits.
#[derive(Debug, Clone)]
pub struct VectorRateLimit<C = StopWatch> {
    clock: C,
    rate: f64,
    last: Vec2,
}

impl VectorRateLimit<StopWatch> {
    /// Limit the output to move `rate` units per second.
    pub fn new(rate: f64) -> Self {
        Self::with_clock(rate, StopWatch::new())
    }
}

impl<C: Clock> VectorRateLimit<C> {
    /// Limit the output to move `rate` units per second, measured with `clock`.
    pub fn with_clock(rate: f64, clock: C) -> Self {
        Self {
            clock,
            rate,
            last: Vec2::ORIGIN,
        }
    }

    /// The most recent output.
    pub fn last(&self) -> Vec2 {
        self.last
    }

    /// Jump the output to `value`.
    pub fn reset(&mut self, value: Vec2) {
        self.last = value;
        self.clock.sample_and_reset();
    }
}

impl<C: Clock> Filter<Vec2> for VectorRateLimit<C> {
    fn get(&mut self, next: Vec2) -> Vec2 {
        let dt = self.clock.sample_and_reset();

        if self.rate > 0.0 {
            self.last = self.last + (next - self.last).clamp_magnitude(self.rate * dt);
        } else {
            self.last = next;
        }

        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedStepClock, SimulatedTime};
    use approx::assert_relative_eq;

    #[test]
    fn test_rate_limit_ramps_to_target() {
        let mut limit = RateLimit::with_clock(1.0, FixedStepClock::new(0.1));
        let outputs: Vec<f64> = (0..12).map(|_| limit.get(1.0)).collect();

        assert_relative_eq!(outputs[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(outputs[4], 0.5, epsilon = 1e-12);
        assert_relative_eq!(outputs[11], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rate_limit_tracks_elapsed_time() {
        let time = SimulatedTime::new();
        let mut limit = RateLimit::with_clock(2.0, time.clock());

        time.advance(0.25);
        assert_relative_eq!(limit.get(10.0), 0.5, epsilon = 1e-12);
        time.advance(1.0);
        assert_relative_eq!(limit.get(-10.0), -1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_unlimited_passes_through() {
        let mut limit = RateLimit::unlimited();
        assert_relative_eq!(limit.get(42.0), 42.0);

        let mut negative = RateLimit::with_clock(-3.0, FixedStepClock::new(0.02));
        assert_relative_eq!(negative.get(-7.0), -7.0);
    }

    #[test]
    fn test_reset_jumps_output() {
        let mut limit = RateLimit::with_clock(1.0, FixedStepClock::new(0.1));
        limit.reset(5.0);
        assert_relative_eq!(limit.last(), 5.0);
        assert_relative_eq!(limit.get(5.0), 5.0);
    }

    #[test]
    fn test_angle_rate_limit_takes_short_path() {
        let mut limit = AngleRateLimit::with_clock(10f64.to_radians(), FixedStepClock::new(1.0));
        limit.reset(Angle::from_degrees(175.0));

        let output = limit.get(Angle::from_degrees(-170.0));
        assert_relative_eq!(output.to_degrees(), -175.0, epsilon = 1e-9);
        let output = limit.get(Angle::from_degrees(-170.0));
        assert_relative_eq!(output.to_degrees(), -170.0, epsilon = 1e-9);
    }

    #[test]
    fn test_vector_rate_limit_moves_in_straight_line() {
        let mut limit = VectorRateLimit::with_clock(1.0, FixedStepClock::new(1.0));
        let output = limit.get(Vec2::new(3.0, 4.0));
        assert_relative_eq!(output.x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(output.y, 0.8, epsilon = 1e-12);
        assert_relative_eq!(output.magnitude(), 1.0, epsilon = 1e-12);
    }
}
