//! Plain 2D vector.

use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::Angle;

/// A 2D vector of `f64` components, e.g. a joystick position or a field
/// velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Vec2 {
    /// The origin.
    pub const ORIGIN: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector of length `magnitude` pointing along `direction`.
    pub fn from_polar(magnitude: f64, direction: Angle) -> Self {
        direction.to_vec2() * magnitude
    }

    /// Euclidean length.
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Dot product.
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Direction of the vector; the origin maps to zero.
    pub fn angle(self) -> Angle {
        Angle::from_vec2(self)
    }

    /// Same direction, length one. The origin has no direction and is
    /// returned unchanged.
    pub fn normalized(self) -> Vec2 {
        let magnitude = self.magnitude();
        if magnitude > 0.0 {
            self / magnitude
        } else {
            self
        }
    }

    /// Rotate counter-clockwise by `angle`.
    pub fn rotate(self, angle: Angle) -> Vec2 {
        Vec2::new(
            self.x * angle.cos() - self.y * angle.sin(),
            self.x * angle.sin() + self.y * angle.cos(),
        )
    }

    /// Shrink the vector so its length does not exceed `max`, keeping its
    /// direction.
    pub fn clamp_magnitude(self, max: f64) -> Vec2 {
        let magnitude = self.magnitude();
        if magnitude > max && magnitude > 0.0 {
            self * (max / magnitude)
        } else {
            self
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, scale: f64) -> Vec2 {
        Vec2::new(self.x * scale, self.y * scale)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    fn div(self, scale: f64) -> Vec2 {
        Vec2::new(self.x / scale, self.y / scale)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2({:.5}, {:.5})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_magnitude_and_angle() {
        let v = Vec2::new(3.0, 4.0);
        assert_relative_eq!(v.magnitude(), 5.0);
        assert_relative_eq!(v.angle().to_radians(), 4f64.atan2(3.0));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let v = Vec2::new(1.0, 0.0).rotate(Angle::from_whole_degrees(90));
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_clamp_magnitude_keeps_direction() {
        let v = Vec2::new(6.0, 8.0).clamp_magnitude(5.0);
        assert_relative_eq!(v.magnitude(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(v.x, 3.0, epsilon = 1e-12);

        let short = Vec2::new(0.1, 0.1);
        assert_eq!(short.clamp_magnitude(5.0), short);
        assert_eq!(Vec2::ORIGIN.clamp_magnitude(0.0), Vec2::ORIGIN);
    }

    #[test]
    fn test_normalized_origin_is_origin() {
        assert_eq!(Vec2::ORIGIN.normalized(), Vec2::ORIGIN);
        assert_relative_eq!(Vec2::new(0.0, -2.0).normalized().y, -1.0);
    }

    #[test]
    fn test_from_polar() {
        let v = Vec2::from_polar(2.0, Angle::from_whole_degrees(180));
        assert_relative_eq!(v.x, -2.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_operators() {
        let a = Vec2::new(1.0, 2.0);
        let b: Vec2 = (0.5, -1.0).into();
        assert_eq!(a + b, Vec2::new(1.5, 1.0));
        assert_eq!(a - b, Vec2::new(0.5, 3.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
    }
}
