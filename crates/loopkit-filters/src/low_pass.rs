//! First-order low-pass smoothing
//!
//! [`LowPass`] is an exponential moving average whose weight comes from the
//! elapsed time and an RC time constant, so the smoothing stays the same when
//! the control period jitters.

use loopkit_math::{Vec2, clamp_magnitude};

use crate::clock::{Clock, StopWatch};
use crate::filter::Filter;

/// Exponential smoothing with time constant `rc` seconds.
///
/// Each call moves the output toward the input by
/// `alpha = 1 - exp(-dt / rc)` of the remaining distance. After `rc` seconds of
/// constant input the output has covered about 63% of a step. A time constant
/// that is zero or negative disables smoothing. The output starts at zero.
///
/// ```
/// use loopkit_filters::clock::FixedStepClock;
/// use loopkit_filters::{Filter, LowPass};
///
/// let mut smooth = LowPass::with_clock(0.1, FixedStepClock::new(0.1));
/// let first = smooth.get(1.0);
/// assert!((first - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LowPass<C = StopWatch> {
    clock: C,
    rc: f64,
    last: f64,
}

impl LowPass<StopWatch> {
    /// Smooth with time constant `rc` seconds.
    pub fn new(rc: f64) -> Self {
        Self::with_clock(rc, StopWatch::new())
    }
}

impl<C: Clock> LowPass<C> {
    /// Smooth with time constant `rc` seconds, measured with `clock`.
    pub fn with_clock(rc: f64, clock: C) -> Self {
        Self {
            clock,
            rc,
            last: 0.0,
        }
    }

    /// Time constant in seconds.
    pub fn rc(&self) -> f64 {
        self.rc
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

impl<C: Clock> Filter<f64> for LowPass<C> {
    fn get(&mut self, next: f64) -> f64 {
        let dt = self.clock.sample_and_reset();
        self.last += alpha(dt, self.rc) * (next - self.last);
        self.last
    }
}

/// [`LowPass`] applied to both axes of a vector with one shared clock.
#[derive(Debug, Clone)]
pub struct VectorLowPass<C = StopWatch> {
    clock: C,
    rc: f64,
    last: Vec2,
}

impl VectorLowPass<StopWatch> {
    /// Smooth with time constant `rc` seconds.
    pub fn new(rc: f64) -> Self {
        Self::with_clock(rc, StopWatch::new())
    }
}

impl<C: Clock> VectorLowPass<C> {
    /// Smooth with time constant `rc` seconds, measured with `clock`.
    pub fn with_clock(rc: f64, clock: C) -> Self {
        Self {
            clock,
            rc,
            last: Vec2::ORIGIN,
        }
    }

    /// Time constant in seconds.
    pub fn rc(&self) -> f64 {
        self.rc
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

impl<C: Clock> Filter<Vec2> for VectorLowPass<C> {
    fn get(&mut self, next: Vec2) -> Vec2 {
        let dt = self.clock.sample_and_reset();
        self.last = self.last + (next - self.last) * alpha(dt, self.rc);
        self.last
    }
}

/// Fraction of the remaining distance covered after `dt` seconds.
fn alpha(dt: f64, rc: f64) -> f64 {
    if rc > 0.0 {
        clamp_magnitude(1.0 - (-dt / rc).exp(), 1.0)
    } else {
        1.0
    }
}
