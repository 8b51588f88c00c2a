//! Composable closed-loop controllers
//!
//! Every controller maps a setpoint and a measurement to one output per
//! control period through [`Controller<S>`], where `S` is `f64` for linear
//! mechanisms or [`Angle`](loopkit_math::Angle) for rotating ones. Angular
//! controllers measure error along the shortest path, see [`ErrorMeasure`].
//!
//! Control terms compose additively: a [`ControllerGroup`] forwards the same
//! setpoint and measurement to each member and sums their outputs, which is how
//! a feedback term and its feedforward terms are combined.
//!
//! # Example
//!
//! ```
//! use loopkit_control::prelude::*;
//! use loopkit_filters::clock::FixedStepClock;
//! use loopkit_math::Angle;
//!
//! let feedback = PidController::with_clock(3.0, 0.0, 0.0, FixedStepClock::new(0.02));
//! let mut arm = feedback.add(ArmFeedforward::new(0.4));
//!
//! let output = arm.update(Angle::from_degrees(0.0), Angle::from_degrees(-10.0));
//! assert!((output - (3.0 * 10f64.to_radians() + 0.4)).abs() < 1e-9);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod controller;
pub mod feedforward;
pub mod group;
pub mod pid;
pub mod prelude;
pub mod tracked;

pub use config::{MotorFeedforwardGains, PidGains};
pub use controller::{
    AngleController, BoxedController, Controller, ControllerExt, ErrorMeasure, ScalarController,
};
pub use feedforward::{ArmFeedforward, MotorFeedforward, PositionFeedforward, VelocityFeedforward};
pub use group::ControllerGroup;
pub use pid::PidController;
pub use tracked::Tracked;
