//! The controller capability
//!
//! A controller turns a setpoint and a measurement into one actuator output
//! per control period. Compositions call [`Controller::update`]; implementors
//! provide [`Controller::calculate`].

use loopkit_math::{Angle, normalize_radians};
use tracing::trace;

use crate::group::ControllerGroup;

/// How far a measurement is from its setpoint.
///
/// For plain numbers this is the difference. For angles it is the shortest
/// signed rotation from the measurement to the setpoint, in radians, so a
/// controller holding 179° that reads -179° sees an error of -2°, not 358°.
pub trait ErrorMeasure: Copy {
    /// Signed error of `measurement` against `setpoint`.
    fn error(setpoint: Self, measurement: Self) -> f64;

    /// How much the error moved from `previous` to `current`.
    ///
    /// Both arguments are values returned by [`error`](Self::error).
    fn error_change(current: f64, previous: f64) -> f64 {
        current - previous
    }
}

impl ErrorMeasure for f64 {
    #[inline]
    fn error(setpoint: f64, measurement: f64) -> f64 {
        setpoint - measurement
    }
}

impl ErrorMeasure for Angle {
    #[inline]
    fn error(setpoint: Angle, measurement: Angle) -> f64 {
        measurement.distance_to(setpoint).to_radians()
    }

    #[inline]
    fn error_change(current: f64, previous: f64) -> f64 {
        normalize_radians(current - previous, 0.0)
    }
}

/// Closed-loop control law over setpoints of type `S`.
///
/// Controllers are stateful and expect to be called once per control period.
pub trait Controller<S = f64> {
    /// Compute the output for this period.
    fn calculate(&mut self, setpoint: S, measurement: S) -> f64;

    /// Run [`calculate`](Self::calculate) exactly once and return its output.
    ///
    /// This is the entry point compositions use. It is not meant to be
    /// overridden.
    fn update(&mut self, setpoint: S, measurement: S) -> f64 {
        let output = self.calculate(setpoint, measurement);
        trace!(output, "controller update");
        output
    }
}

impl<S, C: Controller<S> + ?Sized> Controller<S> for Box<C> {
    fn calculate(&mut self, setpoint: S, measurement: S) -> f64 {
        (**self).calculate(setpoint, measurement)
    }

    fn update(&mut self, setpoint: S, measurement: S) -> f64 {
        (**self).update(setpoint, measurement)
    }
}

/// Owned, type-erased controller.
pub type BoxedController<S> = Box<dyn Controller<S> + Send>;

/// Boxed controller of `f64` setpoints.
pub type ScalarController = BoxedController<f64>;

/// Boxed controller of [`Angle`] setpoints.
pub type AngleController = BoxedController<Angle>;

/// Combinators available on every controller.
pub trait ControllerExt<S>: Controller<S> + Sized {
    /// Sum this controller's output with `other`'s.
    ///
    /// ```
    /// use loopkit_control::{ArmFeedforward, Controller, ControllerExt, PidController};
    /// use loopkit_filters::clock::FixedStepClock;
    /// use loopkit_math::Angle;
    ///
    /// let pid = PidController::with_clock(2.0, 0.0, 0.0, FixedStepClock::new(0.02));
    /// let mut arm = pid.add(ArmFeedforward::new(0.5));
    ///
    /// let level = Angle::ZERO;
    /// let output = arm.update(level, level);
    /// assert!((output - 0.5).abs() < 1e-12);
    /// ```
    fn add<C>(self, other: C) -> ControllerGroup<S>
    where
        Self: Send + 'static,
        C: Controller<S> + Send + 'static,
    {
        ControllerGroup::new(Box::new(self), [Box::new(other) as BoxedController<S>])
    }
}

impl<S, C: Controller<S>> ControllerExt<S> for C {}
