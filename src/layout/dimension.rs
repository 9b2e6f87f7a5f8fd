//! Dimension geometry generator.
//!
//! One pure branch per [`DimensionKind`]. Every branch fills the same
//! [`DimensionGeometry`] shape: extension lines, the dimension line (an arc
//! for angle dimensions), arrowheads, optional crosshair and leader tail, and
//! a label laid out by the text anchor engine.

use glam::{DVec2, dvec2};

use crate::config::LayoutConfig;
use crate::defaults;
use crate::errors::Degenerate;
use crate::geometry::{Arrowhead, Crosshair, LineSegment, PathSegment, Segment};
use crate::log::{debug, warn};
use crate::macros::code_enum;
use crate::types::{Angle, BBox, Point};

use super::arc::{CurvedSegment, reconstruct_arc};
use super::measure::{StrokeFont, TextMeasure};
use super::text::{TextAlign, TextPlacement, TextSpec, layout_text_with};

code_enum! {
    /// What a dimension measures
    pub enum DimensionKind("dimension kind") {
        /// Distance along the p1-p2 chord
        Parallel = "parallel",
        /// Like parallel, with a centre mark
        Diameter = "diameter",
        Horizontal = "horizontal",
        Vertical = "vertical",
        /// Centre p1 to rim p2
        Radius = "radius",
        /// Arrow plus tail, no value
        Leader = "leader",
        /// Opening angle at p1 between the p2 and p3 arms
        Angle = "angle",
    }
}

code_enum! {
    /// Display unit of a measured length
    pub enum Unit("unit") {
        Mic = "mic",
        Mm = "mm",
        Mil = "mil",
        Inch = "in",
    }
}

impl Unit {
    /// Short label appended to a visible value
    pub fn label(self) -> &'static str {
        self.name()
    }

    /// Convert a length in millimetres into this unit
    pub fn from_mm(self, mm: f64) -> f64 {
        match self {
            Unit::Mic => mm * 1000.0,
            Unit::Mm => mm,
            Unit::Mil => mm / defaults::MM_PER_MIL,
            Unit::Inch => mm / defaults::MM_PER_INCH,
        }
    }
}

/// A dimension element snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionSpec {
    pub kind: DimensionKind,
    /// First measured point (centre for radius, vertex for angle, tip for leader)
    pub p1: Point,
    /// Second measured point
    pub p2: Point,
    /// Placement point
    pub p3: Point,
    /// Line width
    pub width: f64,
    /// Extension past the dimension line; 0 picks `15 * width`
    pub ext_length: f64,
    /// Gap between a measured point and its extension line
    pub ext_offset: f64,
    pub text_size: f64,
    pub text_ratio: u8,
    /// Decimal places
    pub precision: u8,
    pub unit: Unit,
    /// Append the unit label
    pub visible: bool,
}

impl DimensionSpec {
    pub fn new(kind: DimensionKind, p1: Point, p2: Point, p3: Point) -> Self {
        Self {
            kind,
            p1,
            p2,
            p3,
            width: defaults::DIMENSION_WIDTH,
            ext_length: 0.0,
            ext_offset: 0.0,
            text_size: defaults::DIMENSION_TEXT_SIZE,
            text_ratio: defaults::DIMENSION_TEXT_RATIO,
            precision: defaults::DIMENSION_PRECISION,
            unit: Unit::Mm,
            visible: true,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_ext_length(mut self, ext_length: f64) -> Self {
        self.ext_length = ext_length;
        self
    }

    pub fn with_ext_offset(mut self, ext_offset: f64) -> Self {
        self.ext_offset = ext_offset;
        self
    }

    pub fn with_text(mut self, size: f64, ratio: u8) -> Self {
        self.text_size = size;
        self.text_ratio = ratio;
        self
    }

    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    fn is_finite(&self) -> bool {
        self.p1.is_finite()
            && self.p2.is_finite()
            && self.p3.is_finite()
            && self.width.is_finite()
            && self.ext_length.is_finite()
            && self.ext_offset.is_finite()
    }
}

/// The measured value as positioned text
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionLabel {
    /// Element origin of the text
    pub anchor: Point,
    pub text: TextSpec,
    pub placement: TextPlacement,
}

/// Everything needed to draw one dimension
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionGeometry {
    pub kind: DimensionKind,
    pub ext_line1: Option<LineSegment>,
    pub ext_line2: Option<LineSegment>,
    pub dim_line: Segment,
    pub arrow1: Option<Arrowhead>,
    pub arrow2: Option<Arrowhead>,
    pub crosshair: Option<Crosshair>,
    /// Leader tail from p2 to p3
    pub leader_tail: Option<LineSegment>,
    pub label: Option<DimensionLabel>,
    pub measured_value: String,
    pub degenerate: Option<Degenerate>,
}

impl DimensionGeometry {
    fn collapsed(kind: DimensionKind, at: Point, degenerate: Degenerate) -> Self {
        Self {
            kind,
            ext_line1: None,
            ext_line2: None,
            dim_line: Segment::Line(LineSegment::point(at)),
            arrow1: None,
            arrow2: None,
            crosshair: None,
            leader_tail: None,
            label: None,
            measured_value: "0".to_string(),
            degenerate: Some(degenerate),
        }
    }

    fn new(kind: DimensionKind, dim_line: Segment) -> Self {
        Self {
            kind,
            ext_line1: None,
            ext_line2: None,
            dim_line,
            arrow1: None,
            arrow2: None,
            crosshair: None,
            leader_tail: None,
            label: None,
            measured_value: String::new(),
            degenerate: None,
        }
    }

    /// Every stroked segment, dimension line first
    pub fn segments(&self) -> Vec<Segment> {
        let mut out = vec![self.dim_line];
        out.extend(self.ext_line1.map(Segment::Line));
        out.extend(self.ext_line2.map(Segment::Line));
        if let Some(c) = self.crosshair {
            out.extend(c.segments().map(Segment::Line));
        }
        out.extend(self.leader_tail.map(Segment::Line));
        out
    }

    /// Every filled arrowhead
    pub fn arrows(&self) -> impl Iterator<Item = &Arrowhead> {
        self.arrow1.iter().chain(self.arrow2.iter())
    }

    /// Bounds of the strokes and arrowheads (labels excluded)
    pub fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        for seg in self.segments() {
            bb.expand_box(&seg.bounds());
        }
        for arrow in self.arrows() {
            for p in arrow.points() {
                bb.expand_point(p);
            }
        }
        bb
    }
}

/// Round half-up to `precision` decimals and append the unit label when visible
pub fn format_measurement(mm: f64, precision: u8, unit: Unit, visible: bool) -> String {
    let value = round_half_up(unit.from_mm(mm), precision);
    let mut s = format!("{:.*}", usize::from(precision), value);
    if visible {
        s.push_str(unit.label());
    }
    s
}

/// Round half-up to `precision` decimals and append a degree sign when visible
pub fn format_angle(degrees: f64, precision: u8, visible: bool) -> String {
    let value = round_half_up(degrees, precision);
    let mut s = format!("{:.*}", usize::from(precision), value);
    if visible {
        s.push('°');
    }
    s
}

fn round_half_up(value: f64, precision: u8) -> f64 {
    let scale = 10f64.powi(i32::from(precision));
    (value * scale + 0.5).floor() / scale
}

/// Rotation that keeps text along `d` readable: `sign(dx) * asin(dy / |d|)`.
/// The second value is set when the asin argument needed clamping.
fn upright_angle(d: DVec2, length: f64) -> (Angle, bool) {
    let ratio = d.y / length;
    let a = ratio.clamp(-1.0, 1.0).asin().to_degrees();
    let a = if d.x >= 0.0 { a } else { -a };
    (Angle(a), ratio.abs() > 1.0)
}

/// Direction the top of the glyphs faces at a rotation
fn text_up(rotation: Angle) -> DVec2 {
    DVec2::from_angle(rotation.to_radians()).perp()
}

/// Builds dimension geometry with a given configuration and text measurer
pub struct DimensionGenerator<'a> {
    config: LayoutConfig,
    measure: &'a dyn TextMeasure,
}

impl<'a> DimensionGenerator<'a> {
    pub fn new(config: LayoutConfig, measure: &'a dyn TextMeasure) -> Self {
        Self { config, measure }
    }

    pub fn generate(&self, spec: &DimensionSpec) -> DimensionGeometry {
        if !spec.is_finite() {
            warn!(kind = %spec.kind, "non-finite dimension input");
            let at = if spec.p1.is_finite() { spec.p1 } else { Point::ORIGIN };
            return DimensionGeometry::collapsed(spec.kind, at, Degenerate::NonFiniteInput);
        }
        // A chord too short to normalize collapses like coincident points
        if (spec.p2.vec() - spec.p1.vec()).try_normalize().is_none() {
            warn!(kind = %spec.kind, p = %spec.p1, "dimension with coincident points");
            return DimensionGeometry::collapsed(spec.kind, spec.p1, Degenerate::ZeroLengthChord);
        }

        debug!(kind = %spec.kind, "generating dimension");
        match spec.kind {
            DimensionKind::Parallel | DimensionKind::Diameter => self.aligned(spec),
            DimensionKind::Horizontal => self.horizontal(spec),
            DimensionKind::Vertical => self.vertical(spec),
            DimensionKind::Radius => self.radius(spec),
            DimensionKind::Leader => self.leader(spec),
            DimensionKind::Angle => self.angle(spec),
        }
    }

    fn arrow(&self, spec: &DimensionSpec, tip: DVec2, dir: DVec2) -> Option<Arrowhead> {
        let dir = dir.try_normalize()?;
        let (len, base) = self.config.arrow_size(spec.width);
        Some(Arrowhead::new(tip.into(), dir, len, base))
    }

    fn label(
        &self,
        spec: &DimensionSpec,
        value: &str,
        anchor: DVec2,
        rotation: Angle,
        align: TextAlign,
    ) -> DimensionLabel {
        let text = TextSpec::new(value, spec.text_size)
            .with_ratio(spec.text_ratio)
            .with_align(align)
            .with_rotation(rotation);
        let placement = layout_text_with(&text, self.measure.measure(&text), &self.config);
        DimensionLabel {
            anchor: anchor.into(),
            text,
            placement,
        }
    }

    fn length_value(&self, spec: &DimensionSpec, mm: f64) -> String {
        format_measurement(mm, spec.precision, spec.unit, spec.visible)
    }

    /// Parallel and diameter: everything is expressed in the chord frame
    /// (`u` along p1->p2, `n` its left normal). The dimension line is centred
    /// on p3.
    fn aligned(&self, spec: &DimensionSpec) -> DimensionGeometry {
        let (p1, p2, p3) = (spec.p1.vec(), spec.p2.vec(), spec.p3.vec());
        let d = p2 - p1;
        let hyp12 = d.length();
        let u = d / hyp12;
        let n = u.perp();
        let mid = (p1 + p2) * 0.5;

        // Signed distance of the placement point from the chord; ties go to the left side
        let h = (p3 - mid).dot(n);
        let side = if h >= 0.0 { 1.0 } else { -1.0 };
        let ext_len = self.config.ext_length(spec.width, spec.ext_length);
        let ext = |p: DVec2| {
            LineSegment::new(
                (p + n * side * spec.ext_offset).into(),
                (p + n * h + n * side * ext_len).into(),
            )
        };

        let center = p3;
        let gap = self.config.arrow_gap(spec.width);
        let half = (hyp12 / 2.0 - gap).max(0.0);
        let line = LineSegment::new((center - u * half).into(), (center + u * half).into());

        let (rotation, clamped) = upright_angle(d, hyp12);
        let align = match (d.x >= 0.0, side > 0.0) {
            (true, true) | (false, false) => TextAlign::BottomCenter,
            (true, false) | (false, true) => TextAlign::TopCenter,
        };
        debug!(right = d.x >= 0.0, up = d.y >= 0.0, side, ?align, "aligned dimension branch");

        let value = self.length_value(spec, hyp12);
        let label_gap = spec.width * self.config.label_gap_factor;
        let label = self.label(spec, &value, center + n * side * label_gap, rotation, align);

        let mut g = DimensionGeometry::new(spec.kind, line.into());
        g.ext_line1 = Some(ext(p1));
        g.ext_line2 = Some(ext(p2));
        g.arrow1 = self.arrow(spec, center - u * (hyp12 / 2.0), -u);
        g.arrow2 = self.arrow(spec, center + u * (hyp12 / 2.0), u);
        if spec.kind == DimensionKind::Diameter {
            g.crosshair = Some(Crosshair {
                center: mid.into(),
                half: spec.width * self.config.crosshair_factor,
            });
        }
        g.label = Some(label);
        g.measured_value = value;
        g.degenerate = clamped.then_some(Degenerate::AsinDomain);
        g
    }

    fn horizontal(&self, spec: &DimensionSpec) -> DimensionGeometry {
        let (p1, p2, p3) = (spec.p1, spec.p2, spec.p3);
        let ext_len = self.config.ext_length(spec.width, spec.ext_length);
        let ext = |p: Point| {
            let s = if p3.y >= p.y { 1.0 } else { -1.0 };
            LineSegment::new(
                Point::new(p.x, p.y + s * spec.ext_offset),
                Point::new(p.x, p3.y + s * ext_len),
            )
        };

        let a = dvec2(p1.x, p3.y);
        let b = dvec2(p2.x, p3.y);
        let value = self.length_value(spec, (p1.x - p2.x).abs());

        let side = if p3.y >= (p1.y + p2.y) / 2.0 { 1.0 } else { -1.0 };
        let align = if side > 0.0 {
            TextAlign::BottomCenter
        } else {
            TextAlign::TopCenter
        };
        let label_gap = spec.width * self.config.label_gap_factor;
        let anchor = (a + b) * 0.5 + dvec2(0.0, side * label_gap);

        let mut g = DimensionGeometry::new(spec.kind, LineSegment::new(a.into(), b.into()).into());
        g.ext_line1 = Some(ext(p1));
        g.ext_line2 = Some(ext(p2));
        g.arrow1 = self.arrow(spec, a, a - b);
        g.arrow2 = self.arrow(spec, b, b - a);
        g.label = Some(self.label(spec, &value, anchor, Angle::ZERO, align));
        g.measured_value = value;
        g
    }

    fn vertical(&self, spec: &DimensionSpec) -> DimensionGeometry {
        let (p1, p2, p3) = (spec.p1, spec.p2, spec.p3);
        let ext_len = self.config.ext_length(spec.width, spec.ext_length);
        let ext = |p: Point| {
            let s = if p3.x >= p.x { 1.0 } else { -1.0 };
            LineSegment::new(
                Point::new(p.x + s * spec.ext_offset, p.y),
                Point::new(p3.x + s * ext_len, p.y),
            )
        };

        let a = dvec2(p3.x, p1.y);
        let b = dvec2(p3.x, p2.y);
        let value = self.length_value(spec, (p1.y - p2.y).abs());

        // Rotated 90 degrees the text "up" points to -X
        let side = if p3.x >= (p1.x + p2.x) / 2.0 { 1.0 } else { -1.0 };
        let align = if side < 0.0 {
            TextAlign::BottomCenter
        } else {
            TextAlign::TopCenter
        };
        let label_gap = spec.width * self.config.label_gap_factor;
        let anchor = (a + b) * 0.5 + dvec2(side * label_gap, 0.0);

        let mut g = DimensionGeometry::new(spec.kind, LineSegment::new(a.into(), b.into()).into());
        g.ext_line1 = Some(ext(p1));
        g.ext_line2 = Some(ext(p2));
        g.arrow1 = self.arrow(spec, a, a - b);
        g.arrow2 = self.arrow(spec, b, b - a);
        g.label = Some(self.label(spec, &value, anchor, Angle(90.0), align));
        g.measured_value = value;
        g
    }

    fn radius(&self, spec: &DimensionSpec) -> DimensionGeometry {
        let (p1, p2, p3) = (spec.p1.vec(), spec.p2.vec(), spec.p3.vec());
        let d = p2 - p1;
        let hyp12 = d.length();
        let hyp13 = p1.distance(p3);
        let u = d / hyp12;

        let (line, arrow) = if hyp13 < hyp12 {
            debug!(hyp12, hyp13, "radius dimension inside");
            (LineSegment::new(spec.p1, spec.p2), self.arrow(spec, p2, u))
        } else {
            let hyp23 = p2.distance(p3);
            debug!(hyp12, hyp13, hyp23, "radius dimension outside");
            let end = p2 + u * hyp23;
            (LineSegment::new(spec.p2, end.into()), self.arrow(spec, p2, -u))
        };

        let (rotation, clamped) = upright_angle(d, hyp12);
        let up = text_up(rotation);
        let label_gap = spec.width * self.config.label_gap_factor;
        let anchor = line.start.midpoint(line.end).vec() + up * label_gap;
        let value = self.length_value(spec, hyp12);

        let mut g = DimensionGeometry::new(spec.kind, line.into());
        g.arrow2 = arrow;
        g.crosshair = Some(Crosshair {
            center: spec.p1,
            half: spec.width * self.config.crosshair_factor,
        });
        g.label = Some(self.label(spec, &value, anchor, rotation, TextAlign::BottomCenter));
        g.measured_value = value;
        g.degenerate = clamped.then_some(Degenerate::AsinDomain);
        g
    }

    fn leader(&self, spec: &DimensionSpec) -> DimensionGeometry {
        let (p1, p2) = (spec.p1.vec(), spec.p2.vec());
        let d = p2 - p1;
        let u = d / d.length();
        let gap = self.config.arrow_gap(spec.width).min(d.length());

        let line = LineSegment::new((p1 + u * gap).into(), spec.p2);
        let mut g = DimensionGeometry::new(spec.kind, line.into());
        g.arrow1 = self.arrow(spec, p1, -u);
        g.leader_tail = Some(LineSegment::new(spec.p2, spec.p3));
        g
    }

    fn angle(&self, spec: &DimensionSpec) -> DimensionGeometry {
        let (p1, p2, p3) = (spec.p1.vec(), spec.p2.vec(), spec.p3.vec());
        let arm2 = p2 - p1;
        let Some(u3) = (p3 - p1).try_normalize() else {
            warn!(p = %spec.p1, "angle dimension with coincident vertex and arm");
            return DimensionGeometry::collapsed(spec.kind, spec.p1, Degenerate::ZeroLengthChord);
        };
        let radius = arm2.length();
        let u2 = arm2 / radius;

        // Signed opening in (-180, 180], positive counter-clockwise from the p2 arm
        let mut sweep = (u3.y.atan2(u3.x) - u2.y.atan2(u2.x)).to_degrees();
        if sweep > 180.0 {
            sweep -= 360.0;
        } else if sweep <= -180.0 {
            sweep += 360.0;
        }

        let end = p1 + u3 * radius;
        let arc = reconstruct_arc(&CurvedSegment::new(spec.p2, end.into(), sweep));
        debug!(sweep, radius, "angle dimension");

        let ext_len = self.config.ext_length(spec.width, spec.ext_length);
        let ext = |u: DVec2| {
            LineSegment::new(
                (p1 + u * spec.ext_offset).into(),
                (p1 + u * (radius + ext_len)).into(),
            )
        };

        // Tangents at the arc ends, following the sweep
        let turn = if sweep >= 0.0 { 1.0 } else { -1.0 };
        let value = format_angle(sweep.abs(), spec.precision, spec.visible);

        let bisector = DVec2::from_angle(u2.y.atan2(u2.x) + (sweep / 2.0).to_radians());
        let tangent = bisector.perp();
        let (rotation, clamped) = upright_angle(tangent, tangent.length());
        let up = text_up(rotation);
        let align = if up.dot(bisector) >= 0.0 {
            TextAlign::BottomCenter
        } else {
            TextAlign::TopCenter
        };
        let label_gap = spec.width * self.config.label_gap_factor;
        let anchor = p1 + bisector * (radius + label_gap);

        let mut g = DimensionGeometry::new(spec.kind, arc);
        g.ext_line1 = Some(ext(u2));
        g.ext_line2 = Some(ext(u3));
        g.arrow1 = self.arrow(spec, p2, -u2.perp() * turn);
        g.arrow2 = self.arrow(spec, end, u3.perp() * turn);
        g.label = Some(self.label(spec, &value, anchor, rotation, align));
        g.measured_value = value;
        g.degenerate = clamped.then_some(Degenerate::AsinDomain);
        g
    }
}

/// Generate dimension geometry with the default configuration and stroke font
pub fn generate_dimension_geometry(spec: &DimensionSpec) -> DimensionGeometry {
    DimensionGenerator::new(LayoutConfig::default(), &StrokeFont::default()).generate(spec)
}
