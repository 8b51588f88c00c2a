//! Controller wrapper that remembers its last update

use crate::controller::{Controller, ErrorMeasure};

/// Records the setpoint, measurement and output of every update.
///
/// Wrapping a controller lets the surrounding code ask whether the mechanism
/// has arrived without keeping its own copy of the last reading.
///
/// ```
/// use loopkit_control::{Controller, PidController, Tracked};
/// use loopkit_filters::clock::FixedStepClock;
///
/// let pid = PidController::with_clock(0.5, 0.0, 0.0, FixedStepClock::new(0.02));
/// let mut elevator = Tracked::new(pid);
///
/// let output = elevator.update(1.0, 0.96);
/// assert!((output - 0.02).abs() < 1e-12);
/// assert!(elevator.is_done(0.05));
/// assert!(!elevator.is_done(0.01));
/// ```
#[derive(Debug, Clone)]
pub struct Tracked<S, C> {
    controller: C,
    setpoint: S,
    measurement: S,
    output: f64,
}

impl<S: ErrorMeasure + Default, C> Tracked<S, C> {
    /// Track `controller`. Before the first update the setpoint and
    /// measurement are `S::default()` and the output is zero.
    pub fn new(controller: C) -> Self {
        Self {
            controller,
            setpoint: S::default(),
            measurement: S::default(),
            output: 0.0,
        }
    }
}

impl<S: ErrorMeasure, C> Tracked<S, C> {
    /// Setpoint of the last update.
    pub fn setpoint(&self) -> S {
        self.setpoint
    }

    /// Measurement of the last update.
    pub fn measurement(&self) -> S {
        self.measurement
    }

    /// Output of the last update.
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Error of the last update, see [`ErrorMeasure`].
    pub fn error(&self) -> f64 {
        S::error(self.setpoint, self.measurement)
    }

    /// Whether the last error was strictly within `tolerance` of zero.
    pub fn is_done(&self, tolerance: f64) -> bool {
        self.error().abs() < tolerance
    }

    /// The wrapped controller.
    pub fn inner(&self) -> &C {
        &self.controller
    }

    /// The wrapped controller, mutably.
    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Unwrap the controller.
    pub fn into_inner(self) -> C {
        self.controller
    }
}

impl<S: ErrorMeasure, C: Controller<S>> Controller<S> for Tracked<S, C> {
    fn calculate(&mut self, setpoint: S, measurement: S) -> f64 {
        self.setpoint = setpoint;
        self.measurement = measurement;
        self.output = self.controller.update(setpoint, measurement);
        self.output
    }
}
