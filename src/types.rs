//! Value types shared by every layout engine.
//!
//! All coordinates are drawing-space millimetres with Y pointing up. Rendering
//! collaborators own any axis flip.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use glam::{DVec2, dvec2};

/// A position in drawing space (mm, math-up)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        self.vec().distance(other.vec())
    }

    /// Calculate the midpoint between two points
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Whether both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// As a glam vector for math
    #[inline]
    pub fn vec(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    /// Whether two points agree within `eps` on both axes
    pub fn approx_eq(self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        p.vec()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A displacement (not a position). Point + Offset = Point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Offset { dx, dy }
    }

    #[inline]
    pub fn vec(self) -> DVec2 {
        dvec2(self.dx, self.dy)
    }

    pub fn length(self) -> f64 {
        self.vec().length()
    }
}

impl From<DVec2> for Offset {
    fn from(v: DVec2) -> Self {
        Offset::new(v.x, v.y)
    }
}

impl Add<Offset> for Point {
    type Output = Point;
    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub<Point> for Point {
    type Output = Offset;
    fn sub(self, rhs: Point) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Offset {
    type Output = Offset;
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for Offset {
    fn add_assign(&mut self, rhs: Offset) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

impl Mul<f64> for Offset {
    type Output = Offset;
    fn mul(self, rhs: f64) -> Offset {
        Offset::new(self.dx * rhs, self.dy * rhs)
    }
}

impl Neg for Offset {
    type Output = Offset;
    fn neg(self) -> Offset {
        Offset::new(-self.dx, -self.dy)
    }
}

/// Angle in degrees
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Angle(pub f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub const fn degrees(deg: f64) -> Self {
        Angle(deg)
    }

    #[inline]
    pub fn deg(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Map into [0, 360). Non-finite angles map to 0.
    pub fn normalized(self) -> Angle {
        if !self.0.is_finite() {
            return Angle::ZERO;
        }
        let d = self.0.rem_euclid(360.0);
        // rem_euclid can return 360.0 for tiny negative inputs
        if d >= 360.0 { Angle::ZERO } else { Angle(d) }
    }

    /// Whether the normalized angle lies in the half-open range [lo, hi)
    pub fn in_range(self, lo: f64, hi: f64) -> bool {
        let d = self.normalized().0;
        d >= lo && d < hi
    }

    /// Rotate an offset counter-clockwise by this angle
    pub fn rotate(self, o: Offset) -> Offset {
        let (s, c) = self.to_radians().sin_cos();
        Offset::new(o.dx * c - o.dy * s, o.dx * s + o.dy * c)
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const ZERO: Size = Size { w: 0.0, h: 0.0 };
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point::new(f64::MAX, f64::MAX),
            max: Point::new(f64::MIN, f64::MIN),
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Expand to include another box
    pub fn expand_box(&mut self, other: &BBox) {
        if !other.is_empty() {
            self.expand_point(other.min);
            self.expand_point(other.max);
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    // ==================== Point/Offset tests ====================

    #[test]
    fn point_plus_offset_gives_point() {
        let p = Point::new(1.0, 2.0) + Offset::new(3.0, 4.0);
        assert_eq!(p, Point::new(4.0, 6.0));
    }

    #[test]
    fn point_minus_point_gives_offset() {
        let o = Point::new(5.0, 7.0) - Point::new(2.0, 3.0);
        assert_eq!(o, Offset::new(3.0, 4.0));
        assert_eq!(o.length(), 5.0);
    }

    #[test]
    fn point_distance_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(a.midpoint(b), Point::new(2.0, 3.0));
        assert!(close(a.distance(Point::new(3.0, 4.0)), 5.0));
    }

    // ==================== Angle tests ====================

    #[test]
    fn angle_normalizes_into_full_turn() {
        assert_eq!(Angle(370.0).normalized(), Angle(10.0));
        assert_eq!(Angle(-90.0).normalized(), Angle(270.0));
        assert_eq!(Angle(360.0).normalized(), Angle(0.0));
        assert_eq!(Angle(f64::NAN).normalized(), Angle(0.0));
    }

    #[test]
    fn angle_in_range_is_half_open() {
        assert!(Angle(90.0).in_range(90.0, 180.0));
        assert!(!Angle(180.0).in_range(90.0, 180.0));
        assert!(Angle(-10.0).in_range(270.0, 360.0));
    }

    #[test]
    fn angle_rotates_counter_clockwise() {
        let o = Angle(90.0).rotate(Offset::new(1.0, 0.0));
        assert!(close(o.dx, 0.0));
        assert!(close(o.dy, 1.0));
    }

    // ==================== BBox tests ====================

    #[test]
    fn bbox_new_is_empty() {
        assert!(BBox::new().is_empty());
    }

    #[test]
    fn bbox_expand_point() {
        let mut bb = BBox::new();
        bb.expand_point(Point::new(1.0, 2.0));
        bb.expand_point(Point::new(3.0, 5.0));
        assert!(!bb.is_empty());
        assert_eq!(bb.width(), 2.0);
        assert_eq!(bb.height(), 3.0);
        assert_eq!(bb.center(), Point::new(2.0, 3.5));
    }

    #[test]
    fn bbox_expand_box_ignores_empty() {
        let mut bb = BBox::new();
        bb.expand_box(&BBox::new());
        assert!(bb.is_empty());
    }
}
