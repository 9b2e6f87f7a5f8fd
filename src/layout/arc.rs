//! Arc reconstruction from curve-angle encoded segments
//!
//! Wires and polygon edges store a curve as a signed angle on a two-point
//! segment: 0 is straight, the sign picks the sweep direction and the
//! magnitude is the angular extent of the arc. Renderers want a radius and
//! the sweep/large-arc flag pair instead.

use crate::errors::{Degenerate, GeometryError};
use crate::geometry::{ArcSegment, LineSegment, Segment};
use crate::log::{debug, warn};
use crate::types::Point;

/// Two endpoints plus a signed curve angle in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvedSegment {
    pub p1: Point,
    pub p2: Point,
    pub curve: f64,
}

impl CurvedSegment {
    pub const fn new(p1: Point, p2: Point, curve: f64) -> Self {
        Self { p1, p2, curve }
    }

    /// A straight segment
    pub const fn straight(p1: Point, p2: Point) -> Self {
        Self { p1, p2, curve: 0.0 }
    }

    /// Build a segment, rejecting curves outside (-360, 360)
    pub fn try_new(p1: Point, p2: Point, curve: f64) -> Result<Self, GeometryError> {
        if !curve.is_finite() || curve.abs() >= 360.0 {
            return Err(GeometryError::CurveOutOfRange { curve });
        }
        Ok(Self { p1, p2, curve })
    }
}

/// Turn a curved segment into a renderer arc, or a line when it is straight.
///
/// Never faults: degenerate input falls back to a straight segment (see
/// [`reconstruct_arc_checked`] to learn which case applied).
pub fn reconstruct_arc(seg: &CurvedSegment) -> Segment {
    reconstruct_arc_checked(seg).0
}

/// Like [`reconstruct_arc`], also reporting a recovered degenerate input
pub fn reconstruct_arc_checked(seg: &CurvedSegment) -> (Segment, Option<Degenerate>) {
    let line = Segment::Line(LineSegment::new(seg.p1, seg.p2));

    if !seg.p1.is_finite() || !seg.p2.is_finite() || !seg.curve.is_finite() {
        warn!(p1 = %seg.p1, p2 = %seg.p2, curve = seg.curve, "non-finite curved segment");
        return (line, Some(Degenerate::NonFiniteInput));
    }

    // Out-of-range curves wrap; a full turn collapses to straight
    let curve = seg.curve % 360.0;
    if curve == 0.0 {
        return (line, None);
    }

    let chord = seg.p1.distance(seg.p2);
    if chord == 0.0 {
        warn!(p = %seg.p1, curve, "curved segment with coincident endpoints");
        return (line, Some(Degenerate::ZeroLengthChord));
    }

    let radius = arc_radius(chord, curve);
    if !radius.is_finite() {
        warn!(chord, curve, "arc radius overflow, drawing straight");
        return (line, Some(Degenerate::NonFiniteInput));
    }

    let arc = ArcSegment {
        start: seg.p1,
        end: seg.p2,
        radius_x: radius,
        radius_y: radius,
        sweep_clockwise: curve < 0.0,
        large_arc: curve.abs() > 180.0,
        curve,
    };
    debug!(radius, sweep_cw = arc.sweep_clockwise, large = arc.large_arc, "reconstructed arc");
    (Segment::Arc(arc), None)
}

/// Radius of the arc spanning `chord` with the given sweep
pub fn arc_radius(chord: f64, curve: f64) -> f64 {
    chord / (2.0 * (curve.abs().to_radians() / 2.0).sin())
}

/// Inverse of [`arc_radius`]: recover the signed curve angle of an arc
pub fn curve_angle_from_arc(
    chord: f64,
    radius: f64,
    sweep_clockwise: bool,
    large_arc: bool,
) -> f64 {
    if radius <= 0.0 || !radius.is_finite() {
        return 0.0;
    }
    let half = (chord / (2.0 * radius)).clamp(-1.0, 1.0).asin();
    let mut curve = (2.0 * half).to_degrees();
    if large_arc {
        curve = 360.0 - curve;
    }
    if sweep_clockwise { -curve } else { curve }
}

/// Build the edges of a polyline or polygon outline.
///
/// `curves[i]` is the curve of the edge leaving `vertices[i]`. A closed outline
/// gets one more edge from the last vertex back to the first, using the last
/// vertex's curve.
pub fn reconstruct_polygon_path(
    vertices: &[Point],
    curves: &[f64],
    closed: bool,
) -> Result<Vec<Segment>, GeometryError> {
    if vertices.len() != curves.len() {
        return Err(GeometryError::CurveCountMismatch {
            vertices: vertices.len(),
            curves: curves.len(),
        });
    }
    if vertices.len() < 2 {
        return Ok(Vec::new());
    }

    let mut edges: Vec<Segment> = vertices
        .windows(2)
        .zip(curves)
        .map(|(pair, &curve)| reconstruct_arc(&CurvedSegment::new(pair[0], pair[1], curve)))
        .collect();

    if closed {
        let last = vertices.len() - 1;
        let closing = CurvedSegment::new(vertices[last], vertices[0], curves[last]);
        edges.push(reconstruct_arc(&closing));
    }

    Ok(edges)
}
