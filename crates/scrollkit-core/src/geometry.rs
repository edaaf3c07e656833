//! 2-D vector used for scroll positions and animated scroll deltas.

use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// A point (or displacement) in scroll space. `x` is horizontal, `y` vertical.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Multiply both components by `c`.
    #[inline]
    pub fn scale(self, c: f64) -> Self {
        Self::new(self.x * c, self.y * c)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, c: f64) -> Point {
        self.scale(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, -2.0);
        assert_eq!(a + b, Point::new(4.0, 2.0));
        assert_eq!(a - b, Point::new(2.0, 6.0));
        assert_eq!(a * 0.5, Point::new(1.5, 2.0));
        assert_eq!(a.scale(2.0), Point::new(6.0, 8.0));
    }

    #[test]
    fn test_assign_ops() {
        let mut p = Point::ZERO;
        p += Point::new(5.0, 5.0);
        p -= Point::new(2.0, 1.0);
        assert_eq!(p, Point::new(3.0, 4.0));
        assert!(!p.is_zero());
        assert!(Point::default().is_zero());
    }
}
