//! Error types for loopkit
//!
//! Every filter and controller in loopkit is infallible once built: numeric
//! degeneracy (division by zero, tangent at a pole) propagates as IEEE `NaN` or
//! `Inf` and disabled limits are simply skipped. The only failures are
//! construction-time ones, and they surface through the types in this crate.
//!
//! - [`validation`]: rejected construction arguments (empty groups, zero step
//!   counts, non-positive polling periods, non-finite limits)
//! - [`common`]: the top-level [`LoopKitError`] and its classification
//!
//! # Example
//!
//! ```
//! use loopkit_errors::prelude::*;
//!
//! fn polling_period(seconds: f64) -> Result<f64> {
//!     if !(seconds > 0.0) {
//!         return Err(ValidationError::out_of_range("period", seconds, 0.0, f64::INFINITY).into());
//!     }
//!     Ok(seconds)
//! }
//!
//! assert!(polling_period(0.02).is_ok());
//! assert!(polling_period(0.0).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod common;
pub mod prelude;
pub mod validation;

pub use common::{ErrorCategory, ErrorSeverity, LoopKitError};
pub use validation::ValidationError;

/// A specialized `Result` type for loopkit construction and configuration.
pub type Result<T> = std::result::Result<T, LoopKitError>;
