//! Prelude for the control crate.

pub use crate::config::{MotorFeedforwardGains, PidGains};
pub use crate::controller::{
    AngleController, BoxedController, Controller, ControllerExt, ErrorMeasure, ScalarController,
};
pub use crate::feedforward::{
    ArmFeedforward, MotorFeedforward, PositionFeedforward, VelocityFeedforward,
};
pub use crate::group::ControllerGroup;
pub use crate::pid::PidController;
pub use crate::tracked::Tracked;
