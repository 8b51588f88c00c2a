//! Prelude for the filters crate.
//!
//! Re-exports the filter and stream traits, the composition types and every
//! concrete filter.
//!
//! # Example
//!
//! ```
//! use loopkit_filters::prelude::*;
//! use loopkit_math::Angle;
//!
//! let mut chain: FilterChain<Angle> = compose![AngleRateLimit::with_clock(
//!     std::f64::consts::PI,
//!     FixedStepClock::new(0.5),
//! )];
//! let output = chain.get(Angle::from_degrees(180.0));
//! assert!((output.to_degrees() - 90.0).abs() < 1e-9);
//! ```

pub use crate::clock::{Clock, FixedStepClock, SimulatedClock, SimulatedTime, StopWatch};
pub use crate::compose;
pub use crate::debounce::{Both, DebounceConfig, DebounceKind, Falling, Rising};
pub use crate::derivative::{AngleVelocity, Derivative};
pub use crate::filter::{
    AngleFilter, BoolFilter, BoxedFilter, Filter, FilterChain, FnFilter, IdentityFilter,
    ScalarFilter, VectorFilter, XYFilter, boxed, from_fn,
};
pub use crate::jerk_limit::{AngleJerkLimit, JerkLimitConfig};
pub use crate::low_pass::{LowPass, VectorLowPass};
pub use crate::rate_limit::{AngleRateLimit, RateLimit, VectorRateLimit};
pub use crate::stream::{FilteredStream, PollingStream, Stream};
