//! Additive controller composition

use core::fmt;

use loopkit_errors::ValidationError;

use crate::controller::{BoxedController, Controller};

/// Controllers sharing one setpoint and measurement, outputs summed.
///
/// A group is never empty. Each period every member is updated exactly once,
/// in insertion order, with the same pair, so stateful members see the same
/// history they would see on their own.
///
/// ```
/// use loopkit_control::{ArmFeedforward, Controller, ControllerGroup};
/// use loopkit_math::Angle;
///
/// let mut group = ControllerGroup::<Angle>::new(Box::new(ArmFeedforward::new(1.0)), [])
///     .add(ArmFeedforward::new(0.5));
///
/// let output = group.update(Angle::ZERO, Angle::from_degrees(30.0));
/// assert!((output - 1.5).abs() < 1e-12);
/// ```
pub struct ControllerGroup<S> {
    controllers: Vec<BoxedController<S>>,
}

impl<S> ControllerGroup<S> {
    /// Group `first` with any number of further controllers.
    pub fn new(
        first: BoxedController<S>,
        rest: impl IntoIterator<Item = BoxedController<S>>,
    ) -> Self {
        let mut controllers = vec![first];
        controllers.extend(rest);
        Self { controllers }
    }

    /// Group a list of controllers.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] if `controllers` is empty.
    pub fn try_from_controllers(
        controllers: Vec<BoxedController<S>>,
    ) -> Result<Self, ValidationError> {
        if controllers.is_empty() {
            return Err(ValidationError::empty("controller group"));
        }
        Ok(Self { controllers })
    }

    /// Append a controller.
    pub fn add(mut self, controller: impl Controller<S> + Send + 'static) -> Self {
        self.push(Box::new(controller));
        self
    }

    /// Append an already boxed controller.
    pub fn push(&mut self, controller: BoxedController<S>) {
        self.controllers.push(controller);
    }

    /// Number of members, always at least one.
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Always `false`; a group holds at least one controller.
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

impl<S: Copy> Controller<S> for ControllerGroup<S> {
    fn calculate(&mut self, setpoint: S, measurement: S) -> f64 {
        self.controllers
            .iter_mut()
            .map(|controller| controller.update(setpoint, measurement))
            .sum()
    }
}

impl<S> TryFrom<Vec<BoxedController<S>>> for ControllerGroup<S> {
    type Error = ValidationError;

    fn try_from(controllers: Vec<BoxedController<S>>) -> Result<Self, Self::Error> {
        Self::try_from_controllers(controllers)
    }
}

impl<S> fmt::Debug for ControllerGroup<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerGroup")
            .field("len", &self.controllers.len())
            .finish()
    }
}
