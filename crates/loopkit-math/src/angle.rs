//! Normalized angle type.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::LazyLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Vec2, normalize_degrees, normalize_radians};

/// Every whole degree in `[0, 360)`, computed once on first use.
static WHOLE_DEGREES: LazyLock<[Angle; 360]> = LazyLock::new(|| {
    core::array::from_fn(|degrees| Angle::from_radians((degrees as f64).to_radians()))
});

/// An angle stored as radians in `(-π, π]`.
///
/// Construction always normalizes, and the sine and cosine are computed once so
/// that filters and controllers reading them every cycle never repeat the trig
/// call. Two angles are equal only when their normalized radian values are
/// bit-identical; there is no epsilon.
///
/// Arithmetic wraps: `Angle::from_degrees(170.0) + Angle::from_degrees(20.0)`
/// is `-170°`. Dividing by zero produces a `NaN` angle rather than an error.
///
/// # Example
///
/// ```
/// use loopkit_math::Angle;
///
/// let heading = Angle::from_degrees(350.0);
/// assert!((heading.to_degrees() + 10.0).abs() < 1e-9);
/// assert!((heading.to_degrees_around(180.0) - 350.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy)]
pub struct Angle {
    radians: f64,
    sin: f64,
    cos: f64,
}

impl Angle {
    /// Zero radians.
    pub const ZERO: Angle = Angle {
        radians: 0.0,
        sin: 0.0,
        cos: 1.0,
    };

    /// Create an angle from radians.
    pub fn from_radians(radians: f64) -> Self {
        // Adding +0.0 folds -0.0 into +0.0 so Eq and Hash see one zero.
        let radians = normalize_radians(radians, 0.0) + 0.0;
        Self {
            radians,
            sin: radians.sin(),
            cos: radians.cos(),
        }
    }

    /// Create an angle from degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    /// Create an angle from a whole number of degrees.
    ///
    /// The result is served from a 360-entry table shared by the whole process,
    /// so no trig is evaluated. Any `i32` is accepted, negative values included.
    ///
    /// ```
    /// use loopkit_math::Angle;
    ///
    /// assert_eq!(Angle::from_whole_degrees(45), Angle::from_whole_degrees(45));
    /// assert_eq!(Angle::from_whole_degrees(405), Angle::from_whole_degrees(45));
    /// assert_eq!(Angle::from_whole_degrees(90), Angle::from_degrees(90.0));
    /// ```
    pub fn from_whole_degrees(degrees: i32) -> Self {
        usize::try_from(degrees.rem_euclid(360))
            .ok()
            .and_then(|index| WHOLE_DEGREES.get(index).copied())
            .unwrap_or_else(|| Self::from_degrees(f64::from(degrees)))
    }

    /// Create an angle from arc minutes.
    pub fn from_arc_minutes(arc_minutes: f64) -> Self {
        Self::from_degrees(arc_minutes / 60.0)
    }

    /// Create an angle from arc seconds.
    pub fn from_arc_seconds(arc_seconds: f64) -> Self {
        Self::from_arc_minutes(arc_seconds / 60.0)
    }

    /// Direction of the vector `(x, y)`, i.e. `atan2(y, x)`.
    pub fn from_vector(x: f64, y: f64) -> Self {
        Self::from_radians(y.atan2(x))
    }

    /// Direction of `vector`.
    pub fn from_vec2(vector: Vec2) -> Self {
        Self::from_vector(vector.x, vector.y)
    }

    /// Angle of a line with the given rise over run.
    pub fn from_slope(slope: f64) -> Self {
        Self::from_radians(slope.atan())
    }

    /// Radians in `(-π, π]`.
    #[inline]
    pub fn to_radians(self) -> f64 {
        self.radians
    }

    /// Radians in `(center - π, center + π]`.
    ///
    /// Use this when a continuous value is needed near the ±π seam, for example
    /// to compare against an unwrapped encoder reading.
    #[inline]
    pub fn to_radians_around(self, center: f64) -> f64 {
        normalize_radians(self.radians, center)
    }

    /// Degrees in `(-180, 180]`.
    #[inline]
    pub fn to_degrees(self) -> f64 {
        self.radians.to_degrees()
    }

    /// Degrees in `(center - 180, center + 180]`.
    #[inline]
    pub fn to_degrees_around(self, center: f64) -> f64 {
        normalize_degrees(self.to_degrees(), center)
    }

    /// Cached sine.
    #[inline]
    pub fn sin(self) -> f64 {
        self.sin
    }

    /// Cached cosine.
    #[inline]
    pub fn cos(self) -> f64 {
        self.cos
    }

    /// `sin / cos`; infinite or very large at ±90°.
    #[inline]
    pub fn tan(self) -> f64 {
        self.sin / self.cos
    }

    /// The angle as a point on the unit circle.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.cos, self.sin)
    }

    /// Rotate by `radians`.
    pub fn add_radians(self, radians: f64) -> Self {
        Self::from_radians(self.radians + radians)
    }

    /// Rotate by `degrees`.
    pub fn add_degrees(self, degrees: f64) -> Self {
        self.add_radians(degrees.to_radians())
    }

    /// Multiply the angle by `factor`, re-normalizing the result.
    pub fn scale(self, factor: f64) -> Self {
        self * factor
    }

    /// Shortest signed rotation that takes `self` to `target`.
    ///
    /// ```
    /// use loopkit_math::Angle;
    ///
    /// let from = Angle::from_degrees(-170.0);
    /// let to = Angle::from_degrees(170.0);
    /// assert!((from.distance_to(to).to_degrees() + 20.0).abs() < 1e-9);
    /// ```
    pub fn distance_to(self, target: Angle) -> Angle {
        target - self
    }

    /// Angular velocity in rad/s that moves from `previous` to `self` in `dt`
    /// seconds along the shortest path.
    ///
    /// A `dt` of zero yields `±Inf` or `NaN`.
    #[inline]
    pub fn velocity_radians(self, previous: Angle, dt: f64) -> f64 {
        (self - previous).radians / dt
    }
}

impl Default for Angle {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        self.radians.to_bits() == other.radians.to_bits()
    }
}

impl Eq for Angle {}

impl Hash for Angle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.radians.to_bits().hash(state);
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.radians + rhs.radians)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.radians - rhs.radians)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, scale: f64) -> Angle {
        Angle::from_radians(self.radians * scale)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;

    fn div(self, scale: f64) -> Angle {
        Angle::from_radians(self.radians / scale)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::from_radians(-self.radians)
    }
}

impl fmt::Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Angle")
            .field("radians", &self.radians)
            .field("degrees", &self.to_degrees())
            .finish()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Angle({:.5}deg)", self.to_degrees())
    }
}

impl Serialize for Angle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.radians)
    }
}

impl<'de> Deserialize<'de> for Angle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Angle::from_radians)
    }
}
