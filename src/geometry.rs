//! Output primitives: segments, arcs, arrowheads, crosshairs
//!
//! Every layout engine describes its result with these types. They are plain
//! values in drawing space; how they get stroked or filled is up to the host.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use crate::types::{Angle, BBox, Point};

/// Common behavior for path segments
#[enum_dispatch]
pub trait PathSegment {
    /// First point of the segment
    fn start(&self) -> Point;

    /// Last point of the segment
    fn end(&self) -> Point;

    /// Point at parameter `t` in [0, 1] along the segment
    fn point_at(&self, t: f64) -> Point;

    /// Length along the path
    fn length(&self) -> f64;

    /// Tight axis-aligned bounds
    fn bounds(&self) -> BBox;
}

/// A straight segment. May have zero length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// A zero-length segment sitting at `p`
    pub const fn point(p: Point) -> Self {
        Self { start: p, end: p }
    }

    pub fn is_zero_length(&self) -> bool {
        self.start == self.end
    }

    /// Unit direction from start to end, `None` for zero-length segments
    pub fn direction(&self) -> Option<DVec2> {
        (self.end.vec() - self.start.vec()).try_normalize()
    }
}

impl PathSegment for LineSegment {
    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        self.end
    }

    fn point_at(&self, t: f64) -> Point {
        self.start.vec().lerp(self.end.vec(), t).into()
    }

    fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        bb.expand_point(self.start);
        bb.expand_point(self.end);
        bb
    }
}

/// A circular arc in the renderer's start/end/radius/flags form.
///
/// `curve` is the signed sweep in degrees; positive sweeps run
/// counter-clockwise in math-up space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub start: Point,
    pub end: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    pub sweep_clockwise: bool,
    pub large_arc: bool,
    pub curve: f64,
}

impl ArcSegment {
    pub fn radius(&self) -> f64 {
        self.radius_x
    }

    /// Signed sweep of the arc
    pub fn sweep_angle(&self) -> Angle {
        Angle(self.curve)
    }

    /// Centre of the circle carrying the arc
    pub fn center(&self) -> Point {
        let (s, e) = (self.start.vec(), self.end.vec());
        let Some(u) = (e - s).try_normalize() else {
            return self.start;
        };
        let left = dvec2(-u.y, u.x);
        let normal = if self.sweep_clockwise { -left } else { left };
        // cos goes negative past 180 degrees, moving the centre across the chord
        let half = self.curve.abs().to_radians() / 2.0;
        let mid = (s + e) * 0.5;
        (mid + normal * self.radius_x * half.cos()).into()
    }

    fn start_phase(&self) -> f64 {
        let r = self.start.vec() - self.center().vec();
        r.y.atan2(r.x)
    }
}

impl PathSegment for ArcSegment {
    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        self.end
    }

    fn point_at(&self, t: f64) -> Point {
        let c = self.center().vec();
        let phase = self.start_phase() + t * self.curve.to_radians();
        (c + DVec2::from_angle(phase) * self.radius_x).into()
    }

    fn length(&self) -> f64 {
        self.radius_x * self.curve.abs().to_radians()
    }

    fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        bb.expand_point(self.start);
        bb.expand_point(self.end);

        let c = self.center().vec();
        let from = self.start_phase().to_degrees();
        // Cardinal extremes the sweep passes over
        for k in 0..4 {
            let cardinal = 90.0 * k as f64;
            let delta = if self.curve >= 0.0 {
                (cardinal - from).rem_euclid(360.0)
            } else {
                (from - cardinal).rem_euclid(360.0)
            };
            if delta <= self.curve.abs() {
                let dir = DVec2::from_angle(cardinal.to_radians());
                bb.expand_point((c + dir * self.radius_x).into());
            }
        }
        bb
    }
}

/// Either a straight line or an arc
#[enum_dispatch(PathSegment)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(LineSegment),
    Arc(ArcSegment),
}

impl Segment {
    pub fn is_arc(&self) -> bool {
        matches!(self, Segment::Arc(_))
    }

    pub fn as_arc(&self) -> Option<&ArcSegment> {
        match self {
            Segment::Arc(a) => Some(a),
            Segment::Line(_) => None,
        }
    }

    pub fn as_line(&self) -> Option<&LineSegment> {
        match self {
            Segment::Line(l) => Some(l),
            Segment::Arc(_) => None,
        }
    }
}

/// A filled triangular arrowhead
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub tip: Point,
    pub left: Point,
    pub right: Point,
}

impl Arrowhead {
    /// Arrowhead with its tip at `tip`, pointing along the unit vector `dir`
    pub fn new(tip: Point, dir: DVec2, length: f64, width: f64) -> Self {
        let base = tip.vec() - dir * length;
        let perp = dvec2(-dir.y, dir.x) * (width / 2.0);
        Self {
            tip,
            left: (base + perp).into(),
            right: (base - perp).into(),
        }
    }

    /// Polygon points, tip first
    pub fn points(&self) -> [Point; 3] {
        [self.tip, self.left, self.right]
    }

    /// Unit vector the arrow points along
    pub fn direction(&self) -> DVec2 {
        let base = self.left.midpoint(self.right);
        (self.tip.vec() - base.vec()).normalize_or_zero()
    }
}

/// A centre mark: two perpendicular arms crossing at `center`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crosshair {
    pub center: Point,
    pub half: f64,
}

impl Crosshair {
    pub fn segments(&self) -> [LineSegment; 2] {
        let c = self.center;
        [
            LineSegment::new(Point::new(c.x - self.half, c.y), Point::new(c.x + self.half, c.y)),
            LineSegment::new(Point::new(c.x, c.y - self.half), Point::new(c.x, c.y + self.half)),
        ]
    }
}

/// A circle outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter_arc() -> ArcSegment {
        let r = 10.0 / (2.0 * 45f64.to_radians().sin());
        ArcSegment {
            start: Point::new(0.0, 0.0),
            end: Point::new(10.0, 0.0),
            radius_x: r,
            radius_y: r,
            sweep_clockwise: false,
            large_arc: false,
            curve: 90.0,
        }
    }

    #[test]
    fn ccw_quarter_arc_centre_is_left_of_chord() {
        let c = quarter_arc().center();
        assert!(c.approx_eq(Point::new(5.0, 5.0), 1e-9), "centre was {c}");
    }

    #[test]
    fn arc_point_at_ends() {
        let arc = quarter_arc();
        assert!(arc.point_at(0.0).approx_eq(arc.start, 1e-9));
        assert!(arc.point_at(1.0).approx_eq(arc.end, 1e-9));
    }

    #[test]
    fn ccw_arc_bulges_below_chord() {
        // Centre above the chord, so a CCW sweep from left to right dips down
        let mid = quarter_arc().point_at(0.5);
        assert!(mid.y < 0.0);
        assert!((mid.x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn arc_bounds_include_the_bulge() {
        let arc = quarter_arc();
        let bb = arc.bounds();
        let lowest = 5.0 - arc.radius();
        assert!((bb.min.y - lowest).abs() < 1e-9);
        assert_eq!(bb.max.y, 0.0);
    }

    #[test]
    fn segment_dispatches_to_variant() {
        let seg: Segment = LineSegment::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0)).into();
        assert_eq!(seg.length(), 5.0);
        assert_eq!(seg.point_at(0.5), Point::new(1.5, 2.0));
        assert!(!seg.is_arc());
    }

    #[test]
    fn arrowhead_points_along_direction() {
        let a = Arrowhead::new(Point::new(10.0, 0.0), dvec2(1.0, 0.0), 2.0, 1.0);
        assert_eq!(a.left, Point::new(8.0, 0.5));
        assert_eq!(a.right, Point::new(8.0, -0.5));
        assert_eq!(a.direction(), dvec2(1.0, 0.0));
    }
}
