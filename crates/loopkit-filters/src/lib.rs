//! Stateful filters for fixed-period control loops
//!
//! A control loop reads raw sensor and joystick samples once per period and
//! needs them smoothed, rate limited and debounced before a controller sees
//! them. Every filter here implements one trait, [`Filter<T>`], for one of four
//! signal families: `f64`, `bool`, [`Vec2`](loopkit_math::Vec2) and
//! [`Angle`](loopkit_math::Angle).
//!
//! # Overview
//!
//! - **Composition**: [`FilterChain`], [`compose!`], [`XYFilter`]
//! - **Debounce**: [`Rising`], [`Falling`], [`Both`]
//! - **Motion profiling**: [`AngleJerkLimit`], [`RateLimit`],
//!   [`AngleRateLimit`], [`VectorRateLimit`]
//! - **Smoothing**: [`LowPass`], [`VectorLowPass`]
//! - **Estimation**: [`Derivative`], [`AngleVelocity`]
//! - **Sources**: [`stream::Stream`], [`stream::FilteredStream`],
//!   [`stream::PollingStream`]
//!
//! Time-dependent filters own a [`clock::Clock`]. They default to wall time
//! through [`clock::StopWatch`]; pass a [`clock::SimulatedClock`] or
//! [`clock::FixedStepClock`] to `with_clock` for deterministic behavior.
//!
//! Filters are meant to be called exactly once per control period from a
//! single thread. Nothing here locks except [`stream::PollingStream`].
//!
//! # Example
//!
//! ```
//! use loopkit_filters::prelude::*;
//!
//! let time = SimulatedTime::new();
//! let mut trigger = compose![Rising::with_clock(0.1, time.clock())];
//!
//! assert!(!trigger.get(true));
//! time.advance(0.2);
//! assert!(trigger.get(true));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod clock;
pub mod debounce;
pub mod derivative;
pub mod filter;
pub mod jerk_limit;
pub mod low_pass;
pub mod prelude;
pub mod rate_limit;
pub mod stream;

pub use debounce::{Both, DebounceConfig, DebounceKind, Falling, Rising};
pub use derivative::{AngleVelocity, Derivative};
pub use filter::{
    AngleFilter, BoolFilter, BoxedFilter, Filter, FilterChain, FnFilter, IdentityFilter,
    ScalarFilter, VectorFilter, XYFilter, boxed, from_fn,
};
pub use jerk_limit::{AngleJerkLimit, JerkLimitConfig};
pub use low_pass::{LowPass, VectorLowPass};
pub use rate_limit::{AngleRateLimit, RateLimit, VectorRateLimit};
