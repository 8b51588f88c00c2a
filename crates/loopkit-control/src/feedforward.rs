//! Feedforward models
//!
//! Feedforward terms predict the output a mechanism needs from the setpoint
//! alone. They are usually summed with a feedback controller in a
//! [`ControllerGroup`](crate::ControllerGroup).

use loopkit_filters::clock::{Clock, StopWatch};
use loopkit_filters::{AngleVelocity, Derivative, Filter};
use loopkit_math::Angle;

use crate::controller::Controller;

fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Permanent-magnet DC motor model: `kS·sign(v) + kV·v + kA·a`.
///
/// The acceleration is estimated by differentiating successive velocity
/// requests, so the model is stateful and should see one velocity per period.
#[derive(Debug, Clone)]
pub struct MotorFeedforward<C = StopWatch> {
    ks: f64,
    kv: f64,
    ka: f64,
    acceleration: Derivative<C>,
}

impl MotorFeedforward<StopWatch> {
    /// Model with static, velocity and acceleration gains.
    pub fn new(ks: f64, kv: f64, ka: f64) -> Self {
        Self::with_clock(ks, kv, ka, StopWatch::new())
    }
}

impl<C: Clock> MotorFeedforward<C> {
    /// Model whose acceleration estimate is timed by `clock`.
    pub fn with_clock(ks: f64, kv: f64, ka: f64, clock: C) -> Self {
        Self {
            ks,
            kv,
            ka,
            acceleration: Derivative::with_clock(clock),
        }
    }

    /// Output for the given velocity and acceleration, without touching the
    /// acceleration estimate.
    pub fn output(&self, velocity: f64, acceleration: f64) -> f64 {
        self.ks * sign(velocity) + self.kv * velocity + self.ka * acceleration
    }

    /// Output for the next velocity request.
    pub fn calculate(&mut self, velocity: f64) -> f64 {
        let acceleration = self.acceleration.get(velocity);
        self.output(velocity, acceleration)
    }
}

/// Holds an arm against gravity: `kG·cos(setpoint)`.
///
/// The setpoint is measured from horizontal. The measurement is ignored.
#[derive(Debug, Clone, Copy)]
pub struct ArmFeedforward {
    kg: f64,
}

impl ArmFeedforward {
    /// Gravity gain, the output that holds the arm level.
    pub fn new(kg: f64) -> Self {
        Self { kg }
    }

    /// Gravity gain.
    pub fn kg(&self) -> f64 {
        self.kg
    }
}

impl Controller<Angle> for ArmFeedforward {
    fn calculate(&mut self, setpoint: Angle, _measurement: Angle) -> f64 {
        self.kg * setpoint.cos()
    }
}

/// Feedforward for a velocity setpoint.
#[derive(Debug, Clone)]
pub struct VelocityFeedforward<C = StopWatch> {
    feedforward: MotorFeedforward<C>,
}

impl<C: Clock> VelocityFeedforward<C> {
    /// Drive `feedforward` from the velocity setpoint.
    pub fn new(feedforward: MotorFeedforward<C>) -> Self {
        Self { feedforward }
    }
}

impl<C: Clock> Controller<f64> for VelocityFeedforward<C> {
    fn calculate(&mut self, setpoint: f64, _measurement: f64) -> f64 {
        self.feedforward.calculate(setpoint)
    }
}

/// Feedforward for an angular position setpoint.
///
/// The setpoint is differentiated along the shortest path into a velocity,
/// which drives the motor model. A moving setpoint gets the output needed to
/// follow it; a fixed one gets only what the motor model gives at rest.
#[derive(Debug, Clone)]
pub struct PositionFeedforward<C = StopWatch> {
    feedforward: MotorFeedforward<C>,
    velocity: AngleVelocity<C>,
}

impl PositionFeedforward<StopWatch> {
    /// Drive `feedforward` from the setpoint's wall-clock velocity.
    pub fn new(feedforward: MotorFeedforward<StopWatch>) -> Self {
        Self::with_clock(feedforward, StopWatch::new())
    }
}

impl<C: Clock> PositionFeedforward<C> {
    /// Drive `feedforward` from the setpoint's velocity timed by `clock`.
    pub fn with_clock(feedforward: MotorFeedforward<C>, clock: C) -> Self {
        Self {
            feedforward,
            velocity: AngleVelocity::with_clock(clock),
        }
    }
}

impl<C: Clock> Controller<Angle> for PositionFeedforward<C> {
    fn calculate(&mut self, setpoint: Angle, _measurement: Angle) -> f64 {
        let velocity = self.velocity.get(setpoint);
        self.feedforward.calculate(velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use loopkit_filters::clock::FixedStepClock;

    const PERIOD: f64 = 0.02;

    fn motor(ks: f64, kv: f64, ka: f64) -> MotorFeedforward<FixedStepClock> {
        MotorFeedforward::with_clock(ks, kv, ka, FixedStepClock::new(PERIOD))
    }

    #[test]
    fn test_static_term_follows_direction() {
        let model = motor(0.2, 1.0, 0.0);
        assert_relative_eq!(model.output(2.0, 0.0), 2.2);
        assert_relative_eq!(model.output(-2.0, 0.0), -2.2);
        assert_relative_eq!(model.output(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_acceleration_from_velocity_changes() {
        let mut model = motor(0.0, 0.0, 1.0);
        assert_relative_eq!(model.calculate(0.0), 0.0);
        assert_relative_eq!(model.calculate(0.1), 0.1 / PERIOD, epsilon = 1e-9);
        assert_relative_eq!(model.calculate(0.1), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_arm_feedforward_uses_setpoint() {
        let mut arm = ArmFeedforward::new(0.8);
        assert_relative_eq!(arm.update(Angle::ZERO, Angle::from_degrees(45.0)), 0.8);
        assert_relative_eq!(
            arm.update(Angle::from_degrees(60.0), Angle::ZERO),
            0.4,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            arm.update(Angle::from_degrees(90.0), Angle::ZERO),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_velocity_feedforward() {
        let mut ff = VelocityFeedforward::new(motor(0.1, 2.0, 0.0));
        assert_relative_eq!(ff.update(1.5, 0.0), 3.1, epsilon = 1e-12);
    }

    #[test]
    fn test_position_feedforward_differentiates_setpoint() {
        let mut ff = PositionFeedforward::with_clock(motor(0.0, 1.0, 0.0), FixedStepClock::new(PERIOD));

        assert_relative_eq!(ff.update(Angle::from_degrees(179.0), Angle::ZERO), 0.0);
        let output = ff.update(Angle::from_degrees(-179.0), Angle::ZERO);
        assert_relative_eq!(output, 2f64.to_radians() / PERIOD, epsilon = 1e-9);
    }
}
