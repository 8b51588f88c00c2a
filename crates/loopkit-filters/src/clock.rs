//! Elapsed-time sources
//!
//! Every time-dependent filter owns exactly one [`Clock`]. Production code uses
//! [`StopWatch`]; tests drive filters with [`SimulatedClock`] or
//! [`FixedStepClock`] so results are deterministic.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// A resettable elapsed-time measurement, in seconds.
///
/// Implementations must be monotonic: both methods return values `>= 0`.
pub trait Clock: Send {
    /// Seconds since the last reset, without resetting.
    fn elapsed(&self) -> f64;

    /// Seconds since the last reset; the measurement restarts from now.
    fn sample_and_reset(&mut self) -> f64;
}

/// Wall-clock [`Clock`] backed by [`Instant`].
///
/// The measurement starts when the stopwatch is created.
#[derive(Debug, Clone, Copy)]
pub struct StopWatch {
    last: Instant,
}

impl StopWatch {
    /// Start a new stopwatch.
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for StopWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StopWatch {
    fn elapsed(&self) -> f64 {
        self.last.elapsed().as_secs_f64()
    }

    fn sample_and_reset(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last).as_secs_f64();
        self.last = now;
        elapsed
    }
}

/// Manually advanced time shared between a test and the clocks it hands out.
///
/// Cloning shares the same timeline.
///
/// ```
/// use loopkit_filters::clock::{Clock, SimulatedTime};
///
/// let time = SimulatedTime::new();
/// let mut clock = time.clock();
///
/// time.advance(0.25);
/// assert!((clock.sample_and_reset() - 0.25).abs() < 1e-12);
/// assert!(clock.elapsed().abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulatedTime {
    now_bits: Arc<AtomicU64>,
}

impl SimulatedTime {
    /// Create a timeline starting at zero seconds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in seconds.
    pub fn now(&self) -> f64 {
        f64::from_bits(self.now_bits.load(Ordering::Acquire))
    }

    /// Move time forward. Non-positive or non-finite steps are ignored.
    pub fn advance(&self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            let next = self.now() + seconds;
            self.now_bits.store(next.to_bits(), Ordering::Release);
        }
    }

    /// A clock whose measurement starts at the current time.
    pub fn clock(&self) -> SimulatedClock {
        SimulatedClock {
            last: self.now(),
            time: self.clone(),
        }
    }
}

/// [`Clock`] reading a [`SimulatedTime`] timeline.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    time: SimulatedTime,
    last: f64,
}

impl Clock for SimulatedClock {
    fn elapsed(&self) -> f64 {
        (self.time.now() - self.last).max(0.0)
    }

    fn sample_and_reset(&mut self) -> f64 {
        let now = self.time.now();
        let elapsed = (now - self.last).max(0.0);
        self.last = now;
        elapsed
    }
}

/// [`Clock`] that reports the same step on every read, as if each call
/// happened exactly one control period after the previous reset.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    step: f64,
}

impl FixedStepClock {
    /// Create a clock that always reports `step` seconds.
    pub fn new(step: f64) -> Self {
        Self {
            step: step.max(0.0),
        }
    }
}

impl Clock for FixedStepClock {
    fn elapsed(&self) -> f64 {
        self.step
    }

    fn sample_and_reset(&mut self) -> f64 {
        self.step
    }
}
