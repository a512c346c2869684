//! Angle arithmetic and polar/cartesian conversion.
//!
//! Angles are radians normalized to [0, 2*PI). Polar coordinates are
//! relative to some origin (usually the player), with the y axis of the
//! cartesian side inverted because screen coordinates grow downward.

use crate::types::Point;
use std::f64::consts::TAU;

/// An angle in radians, kept in [0, 2*PI) by every operation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub fn new(radians: f64) -> Self {
        Angle(radians.rem_euclid(TAU))
    }

    pub fn radians(&self) -> f64 {
        self.0
    }

    pub fn to_degrees(&self) -> f64 {
        self.0.to_degrees()
    }

    pub fn add(&self, other: Angle) -> Angle {
        Angle::new(self.0 + other.0)
    }

    pub fn sub(&self, other: Angle) -> Angle {
        Angle::new(self.0 - other.0)
    }

    pub fn mul(&self, factor: f64) -> Angle {
        Angle::new(self.0 * factor)
    }

    #[allow(dead_code)]
    pub fn div(&self, divisor: f64) -> Angle {
        Angle::new(self.0 / divisor)
    }

    /// Membership test for the arc running from `lower` to `upper`.
    ///
    /// When `lower > upper` in raw radians the arc crosses the 0/2*PI
    /// seam and membership means `self > lower || self < upper`;
    /// otherwise the plain strict `lower < self < upper` applies. The
    /// comparisons are deliberately on raw radians, not circular
    /// distance: callers arrange which operand is lower and the sector
    /// boundaries of the viewing cone depend on exactly this branch.
    pub fn is_in_bounds(&self, lower: Angle, upper: Angle) -> bool {
        if lower.0 > upper.0 {
            self.0 > lower.0 || self.0 < upper.0
        } else {
            lower.0 < self.0 && self.0 < upper.0
        }
    }
}

/// An (angle, radius) pair relative to some origin and facing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarCoordinate {
    pub angle: Angle,
    pub radius: f64,
}

impl PolarCoordinate {
    pub fn new(angle: Angle, radius: f64) -> Self {
        PolarCoordinate { angle, radius }
    }

    /// Cartesian offset for this coordinate. The y component is negated
    /// because the pixel coordinate system is upside down.
    pub fn to_cartesian(&self) -> Point {
        Point::new(
            self.radius * self.angle.radians().cos(),
            -self.radius * self.angle.radians().sin(),
        )
    }
}

/// Convert a world position to a polar coordinate relative to `origin`.
pub fn relative_polar(origin: Point, point: Point) -> PolarCoordinate {
    let vec = point - origin;

    // Flip y for the same reason to_cartesian negates it.
    let mut rad = (-vec.y).atan2(vec.x);

    // atan2 lands in [-PI, PI]; shift into [0, 2*PI).
    if rad < 0.0 {
        rad += TAU;
    }

    PolarCoordinate::new(Angle::new(rad), vec.length())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_new_normalizes() {
        assert_approx_eq!(Angle::new(TAU + 0.5).radians(), 0.5);
        assert_approx_eq!(Angle::new(-0.5).radians(), TAU - 0.5);
        assert_approx_eq!(Angle::new(TAU).radians(), 0.0);
    }

    #[test]
    fn test_arithmetic_stays_in_range() {
        let a = Angle::new(6.0);
        let b = Angle::new(1.0);
        assert_approx_eq!(a.add(b).radians(), 7.0 - TAU);
        assert_approx_eq!(b.sub(a).radians(), TAU - 5.0);
        assert_approx_eq!(a.mul(2.0).radians(), 12.0 - TAU);
        assert_approx_eq!(a.div(2.0).radians(), 3.0);
    }

    #[test]
    fn test_sub_wraps_below_zero() {
        let result = Angle::new(0.0).sub(Angle::new(0.1));
        assert_approx_eq!(result.radians(), TAU - 0.1);
    }

    #[test]
    fn test_is_in_bounds_plain_range() {
        let lower = Angle::new(1.0);
        let upper = Angle::new(2.0);
        assert!(Angle::new(1.5).is_in_bounds(lower, upper));
        assert!(!Angle::new(2.5).is_in_bounds(lower, upper));
        // Strict at both ends.
        assert!(!Angle::new(1.0).is_in_bounds(lower, upper));
        assert!(!Angle::new(2.0).is_in_bounds(lower, upper));
    }

    #[test]
    fn test_is_in_bounds_wrapped_range() {
        let lower = Angle::new(5.0);
        let upper = Angle::new(1.0);
        assert!(Angle::new(6.0).is_in_bounds(lower, upper));
        assert!(Angle::new(0.5).is_in_bounds(lower, upper));
        assert!(!Angle::new(3.0).is_in_bounds(lower, upper));
    }

    #[test]
    fn test_to_cartesian_inverts_y() {
        let up = PolarCoordinate::new(Angle::new(FRAC_PI_2), 10.0);
        let offset = up.to_cartesian();
        assert_approx_eq!(offset.x, 0.0);
        assert_approx_eq!(offset.y, -10.0);

        let right = PolarCoordinate::new(Angle::new(0.0), 3.0);
        let offset = right.to_cartesian();
        assert_approx_eq!(offset.x, 3.0);
        assert_approx_eq!(offset.y, 0.0);
    }

    #[test]
    fn test_relative_polar() {
        let origin = Point::new(100.0, 100.0);

        // Straight up the screen is PI/2 after the y flip.
        let above = relative_polar(origin, Point::new(100.0, 60.0));
        assert_approx_eq!(above.angle.radians(), FRAC_PI_2);
        assert_approx_eq!(above.radius, 40.0);

        // Straight down lands in the third quadrant shift, not at -PI/2.
        let below = relative_polar(origin, Point::new(100.0, 140.0));
        assert_approx_eq!(below.angle.radians(), PI + FRAC_PI_2);
        assert_approx_eq!(below.radius, 40.0);
    }

    #[test]
    fn test_relative_polar_round_trip() {
        let origin = Point::new(50.0, 80.0);
        let point = Point::new(-20.0, 130.0);
        let polar = relative_polar(origin, point);
        let back = origin + polar.to_cartesian();
        assert_approx_eq!(back.x, point.x, 1e-9);
        assert_approx_eq!(back.y, point.y, 1e-9);
    }
}
