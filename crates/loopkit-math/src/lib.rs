//! Angle and vector math for control loops
//!
//! Every angular filter and controller in loopkit depends on correct wraparound
//! behavior, so angles are stored in one canonical form: radians in `(-π, π]`.
//!
//! - [`Angle`]: immutable normalized angle with cached sine and cosine
//! - [`Vec2`]: plain 2D vector used by the vector filter family
//! - [`normalize_radians`] / [`normalize_degrees`]: wrap a value into the
//!   half-open window of one turn around an arbitrary center
//!
//! # Example
//!
//! ```
//! use loopkit_math::Angle;
//!
//! let a = Angle::from_degrees(170.0);
//! let b = Angle::from_degrees(-170.0);
//!
//! // Shortest signed path from a to b crosses the ±180° seam.
//! assert!((a.distance_to(b).to_degrees() - 20.0).abs() < 1e-9);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod angle;
mod vec2;

pub use angle::Angle;
pub use vec2::Vec2;

/// One full turn in radians.
pub const TAU: f64 = core::f64::consts::TAU;

/// Wrap `radians` into `(center - π, center + π]`.
///
/// The turn count is rounded to nearest with ties resolved toward the upper end
/// of the window, so the result is idempotent:
/// `normalize_radians(normalize_radians(x, c), c) == normalize_radians(x, c)`.
/// Non-finite input yields `NaN`.
///
/// ```
/// use loopkit_math::normalize_radians;
/// use std::f64::consts::PI;
///
/// assert!((normalize_radians(3.0 * PI, 0.0) - PI).abs() < 1e-12);
/// assert!((normalize_radians(-PI, 0.0) - PI).abs() < 1e-12);
/// assert!((normalize_radians(0.5, 2.0 * PI) - (0.5 + 2.0 * PI)).abs() < 1e-12);
/// ```
#[inline]
pub fn normalize_radians(radians: f64, center: f64) -> f64 {
    radians - TAU * ((radians - center) / TAU - 0.5).ceil()
}

/// Wrap `degrees` into `(center - 180, center + 180]`.
#[inline]
pub fn normalize_degrees(degrees: f64, center: f64) -> f64 {
    degrees - 360.0 * ((degrees - center) / 360.0 - 0.5).ceil()
}

/// Clamp `value` into `[-limit, limit]`.
///
/// A `limit` of `NaN` leaves `value` unchanged; a negative limit is treated by
/// its magnitude. `NaN` values pass through.
#[inline]
pub fn clamp_magnitude(value: f64, limit: f64) -> f64 {
    let limit = limit.abs();
    if value > limit {
        limit
    } else if value < -limit {
        -limit
    } else {
        value
    }
}
