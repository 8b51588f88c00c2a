//! Boolean debounce filters
//!
//! Three flavors, all timer driven:
//!
//! 1. [`Rising`]: the input must stay `true` for the duration before the
//!    output becomes `true`
//! 2. [`Falling`]: the input must stay `false` for the duration before the
//!    output becomes `false`
//! 3. [`Both`]: the input must differ from the current output for the duration
//!    before the output follows it
//!
//! The duration check is strict (`duration < elapsed`), so a zero duration
//! passes the input through once any time at all has elapsed since the reset.

use serde::{Deserialize, Serialize};
use tracing::debug;

use loopkit_errors::ValidationError;

use crate::clock::{Clock, StopWatch};
use crate::filter::{BoolFilter, Filter};

/// Rising-edge debounce.
///
/// A `false` input is reported immediately and restarts the timer. A `true`
/// input is reported only once the input has been `true` for longer than the
/// duration.
#[derive(Debug, Clone)]
pub struct Rising<C = StopWatch> {
    clock: C,
    duration: f64,
}

impl Rising<StopWatch> {
    /// Debounce rising edges by `duration` seconds of wall-clock time.
    pub fn new(duration: f64) -> Self {
        Self::with_clock(duration, StopWatch::new())
    }
}

impl<C: Clock> Rising<C> {
    /// Debounce rising edges using the given clock.
    pub fn with_clock(duration: f64, clock: C) -> Self {
        Self { clock, duration }
    }

    /// Debounce duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

impl<C: Clock> Filter<bool> for Rising<C> {
    fn get(&mut self, next: bool) -> bool {
        if !next {
            self.clock.sample_and_reset();
            return false;
        }

        self.duration < self.clock.elapsed()
    }
}

/// Falling-edge debounce.
///
/// A `true` input is reported immediately and restarts the timer. A `false`
/// input is reported only once the input has been `false` for longer than the
/// duration.
#[derive(Debug, Clone)]
pub struct Falling<C = StopWatch> {
    clock: C,
    duration: f64,
}

impl Falling<StopWatch> {
    /// Debounce falling edges by `duration` seconds of wall-clock time.
    pub fn new(duration: f64) -> Self {
        Self::with_clock(duration, StopWatch::new())
    }
}

impl<C: Clock> Falling<C> {
    /// Debounce falling edges using the given clock.
    pub fn with_clock(duration: f64, clock: C) -> Self {
        Self { clock, duration }
    }

    /// Debounce duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

impl<C: Clock> Filter<bool> for Falling<C> {
    fn get(&mut self, next: bool) -> bool {
        if next {
            self.clock.sample_and_reset();
            return true;
        }

        !(self.duration < self.clock.elapsed())
    }
}

/// Two-sided debounce.
///
/// The output holds its last stable value (initially `false`). Every sample
/// equal to the stable value restarts the timer; a differing sample flips the
/// output only once more than the duration has passed since that restart.
#[derive(Debug, Clone)]
pub struct Both<C = StopWatch> {
    clock: C,
    duration: f64,
    stable: bool,
}

impl Both<StopWatch> {
    /// Debounce both edges by `duration` seconds of wall-clock time.
    pub fn new(duration: f64) -> Self {
        Self::with_clock(duration, StopWatch::new())
    }
}

impl<C: Clock> Both<C> {
    /// Debounce both edges using the given clock.
    pub fn with_clock(duration: f64, clock: C) -> Self {
        Self {
            clock,
            duration,
            stable: false,
        }
    }

    /// Debounce duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// The value currently reported.
    pub fn stable(&self) -> bool {
        self.stable
    }
}

impl<C: Clock> Filter<bool> for Both<C> {
    fn get(&mut self, next: bool) -> bool {
        if next == self.stable {
            self.clock.sample_and_reset();
        } else if self.duration < self.clock.elapsed() {
            self.clock.sample_and_reset();
            self.stable = next;
        }

        self.stable
    }
}

/// Which edges a configured debounce filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebounceKind {
    /// See [`Rising`]
    Rising,
    /// See [`Falling`]
    Falling,
    /// See [`Both`]
    Both,
}

/// Serializable debounce settings.
///
/// ```
/// use loopkit_filters::{DebounceConfig, DebounceKind, Filter};
///
/// let config: DebounceConfig = serde_json::from_str(r#"{"kind":"both","duration_s":0.1}"#)?;
/// assert_eq!(config.kind, DebounceKind::Both);
///
/// let mut filter = config.build()?;
/// assert!(!filter.get(true));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Edges to debounce
    pub kind: DebounceKind,
    /// Debounce duration in seconds
    pub duration_s: f64,
}

impl DebounceConfig {
    /// Check the duration is finite and not negative.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a negative or non-finite duration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let duration = ValidationError::require_finite("duration_s", self.duration_s)?;
        if duration < 0.0 {
            return Err(ValidationError::out_of_range(
                "duration_s",
                duration,
                0.0,
                f64::INFINITY,
            ));
        }
        Ok(())
    }

    /// Build the configured filter on a wall-clock [`StopWatch`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if [`validate`](Self::validate) fails.
    pub fn build(&self) -> Result<BoolFilter, ValidationError> {
        self.build_with_clock(StopWatch::new())
    }

    /// Build the configured filter on the given clock.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if [`validate`](Self::validate) fails.
    pub fn build_with_clock<C: Clock + 'static>(
        &self,
        clock: C,
    ) -> Result<BoolFilter, ValidationError> {
        self.validate()?;
        debug!(kind = ?self.kind, duration_s = self.duration_s, "building debounce filter");

        let filter: BoolFilter = match self.kind {
            DebounceKind::Rising => Box::new(Rising::with_clock(self.duration_s, clock)),
            DebounceKind::Falling => Box::new(Falling::with_clock(self.duration_s, clock)),
            DebounceKind::Both => Box::new(Both::with_clock(self.duration_s, clock)),
        };
        Ok(filter)
    }
}
