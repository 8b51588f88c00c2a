//! Finite-difference rate estimators

use loopkit_math::Angle;

use crate::clock::{Clock, StopWatch};
use crate::filter::Filter;

/// Rate of change of a scalar stream, in units per second.
///
/// The first sample has nothing to difference against and reports zero. A call
/// made with no elapsed time repeats the previous rate.
///
/// ```
/// use loopkit_filters::clock::FixedStepClock;
/// use loopkit_filters::{Derivative, Filter};
///
/// let mut rate = Derivative::with_clock(FixedStepClock::new(0.5));
/// assert_eq!(rate.get(1.0), 0.0);
/// assert_eq!(rate.get(2.0), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Derivative<C = StopWatch> {
    clock: C,
    previous: Option<f64>,
    rate: f64,
}

impl Derivative<StopWatch> {
    /// Differentiate against wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(StopWatch::new())
    }
}

impl Default for Derivative<StopWatch> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Derivative<C> {
    /// Differentiate against `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            previous: None,
            rate: 0.0,
        }
    }

    /// The most recent rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Forget the previous sample so the next call reports zero.
    pub fn reset(&mut self) {
        self.previous = None;
        self.rate = 0.0;
        self.clock.sample_and_reset();
    }
}

impl<C: Clock> Filter<f64> for Derivative<C> {
    fn get(&mut self, next: f64) -> f64 {
        let dt = self.clock.sample_and_reset();

        match self.previous {
            None => {
                self.previous = Some(next);
                self.rate = 0.0;
            }
            Some(previous) if dt > 0.0 => {
                self.previous = Some(next);
                self.rate = (next - previous) / dt;
            }
            Some(_) => {}
        }

        self.rate
    }
}

/// Angular velocity of an angle stream, in rad/s.
///
/// Differences are taken along the shortest path, so a stream stepping from
/// 179° to -179° reads as a small positive velocity. Converts an angle stream
/// into a scalar one, so it is not itself a [`Filter`].
#[derive(Debug, Clone)]
pub struct AngleVelocity<C = StopWatch> {
    clock: C,
    previous: Option<Angle>,
    velocity: f64,
}

impl AngleVelocity<StopWatch> {
    /// Differentiate against wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(StopWatch::new())
    }
}

impl Default for AngleVelocity<StopWatch> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> AngleVelocity<C> {
    /// Differentiate against `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            previous: None,
            velocity: 0.0,
        }
    }

    /// Feed the next angle and get the velocity since the previous one.
    pub fn get(&mut self, next: Angle) -> f64 {
        let dt = self.clock.sample_and_reset();

        match self.previous {
            None => {
                self.previous = Some(next);
                self.velocity = 0.0;
            }
            Some(previous) if dt > 0.0 => {
                self.previous = Some(next);
                self.velocity = next.velocity_radians(previous, dt);
            }
            Some(_) => {}
        }

        self.velocity
    }

    /// The most recent velocity.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Forget the previous sample so the next call reports zero.
    pub fn reset(&mut self) {
        self.previous = None;
        self.velocity = 0.0;
        self.clock.sample_and_reset();
    }
}
