//! Text anchor engine.
//!
//! Places a text run so its alignment anchor sits on the element origin,
//! keeps it upright under mirroring and rotation, and compensates for a
//! mirrored parent symbol.
//!
//! # Local text frame
//!
//! The run is laid out with its first baseline on the X axis and the stroke
//! centre of the first glyph at the origin (math-up Y). Further lines go
//! downward by `size + line_spacing` each. The measured width includes the
//! stroke, so the inked run covers `[-stroke/2, width - stroke/2]`.
//!
//! A [`TextPlacement`] maps that frame onto the element anchor:
//!
//! 0. scale X by -1 about `mirror_about_x` (when set)
//! 1. spin: rotate 180° about `pivot` (when `spin_applied`)
//! 2. translate by `translate` (alignment plus parent-mirror compensation)
//! 3. mirror X (when `mirror`)
//! 4. rotate by `rotation`

use glam::{DVec2, dvec2};

use crate::config::LayoutConfig;
use crate::defaults;
use crate::errors::Degenerate;
use crate::log::{trace, warn};
use crate::macros::code_enum;
use crate::types::{Angle, BBox, Offset, Point, Size};

use super::measure::TextMetrics;

code_enum! {
    /// Which point of the text block sits on the element origin
    pub enum TextAlign("text alignment") {
        BottomLeft = "bottom-left",
        BottomCenter = "bottom-center",
        BottomRight = "bottom-right",
        CenterLeft = "center-left",
        Center = "center",
        CenterRight = "center-right",
        TopLeft = "top-left",
        TopCenter = "top-center",
        TopRight = "top-right",
    }
}

/// Horizontal part of an alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical part of an alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Bottom,
    Center,
    Top,
}

impl TextAlign {
    pub fn horizontal(self) -> HAlign {
        match self {
            TextAlign::BottomLeft | TextAlign::CenterLeft | TextAlign::TopLeft => HAlign::Left,
            TextAlign::BottomCenter | TextAlign::Center | TextAlign::TopCenter => HAlign::Center,
            TextAlign::BottomRight | TextAlign::CenterRight | TextAlign::TopRight => HAlign::Right,
        }
    }

    pub fn vertical(self) -> VAlign {
        match self {
            TextAlign::BottomLeft | TextAlign::BottomCenter | TextAlign::BottomRight => {
                VAlign::Bottom
            }
            TextAlign::CenterLeft | TextAlign::Center | TextAlign::CenterRight => VAlign::Center,
            TextAlign::TopLeft | TextAlign::TopCenter | TextAlign::TopRight => VAlign::Top,
        }
    }
}

/// A text element snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    /// Content, lines separated by `\n`
    pub value: String,
    /// Nominal glyph height
    pub size: f64,
    /// Stroke width in percent of `size` (0..=31)
    pub ratio: u8,
    /// Inter-line distance in percent of `size`
    pub line_distance_pct: i32,
    pub align: TextAlign,
    pub rotation: Angle,
    pub mirror: bool,
    /// Force the 180° flip regardless of rotation
    pub spin: bool,
    /// The containing symbol is mirrored
    pub parent_mirror: bool,
}

impl TextSpec {
    pub fn new(value: impl Into<String>, size: f64) -> Self {
        Self {
            value: value.into(),
            size,
            ratio: 8,
            line_distance_pct: 50,
            align: TextAlign::BottomLeft,
            rotation: Angle::ZERO,
            mirror: false,
            spin: false,
            parent_mirror: false,
        }
    }

    pub fn with_ratio(mut self, ratio: u8) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_line_distance(mut self, pct: i32) -> Self {
        self.line_distance_pct = pct;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_rotation(mut self, rotation: Angle) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn with_spin(mut self, spin: bool) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_parent_mirror(mut self, parent_mirror: bool) -> Self {
        self.parent_mirror = parent_mirror;
        self
    }

    /// Ratio limited to the accepted range
    pub fn clamped_ratio(&self) -> u8 {
        self.ratio.min(defaults::MAX_TEXT_RATIO)
    }

    /// Glyph height left after the stroke eats into it
    pub fn effective_size(&self) -> f64 {
        self.size * f64::from(100 - self.clamped_ratio()) / 100.0
    }

    pub fn stroke_width(&self) -> f64 {
        self.size * f64::from(self.clamped_ratio()) / 100.0
    }

    /// Whether the run has to be turned 180° to stay readable
    pub fn needs_spin(&self) -> bool {
        self.spin
            || (self.mirror
                && (self.rotation.in_range(90.0, 180.0) || self.rotation.in_range(270.0, 360.0)))
    }
}

/// Where and how to draw a text run relative to its element origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPlacement {
    /// Centre of the 180° spin, in the local text frame
    pub pivot: Point,
    /// Alignment translation, applied after the spin
    pub translate: Offset,
    /// Element rotation, normalized
    pub rotation: Angle,
    pub spin_applied: bool,
    pub mirror: bool,
    pub effective_size: f64,
    pub stroke_width: f64,
    pub line_spacing: f64,
    pub stack_height: f64,
    /// Size of the inked block
    pub size: Size,
    /// Horizontal mirror axis in the local text frame, applied before the spin
    pub mirror_about_x: Option<f64>,
    pub degenerate: Option<Degenerate>,
}

impl TextPlacement {
    /// Leaves the run where it is
    pub fn identity(degenerate: Option<Degenerate>) -> Self {
        Self {
            pivot: Point::ORIGIN,
            translate: Offset::ZERO,
            rotation: Angle::ZERO,
            spin_applied: false,
            mirror: false,
            effective_size: 0.0,
            stroke_width: 0.0,
            line_spacing: 0.0,
            stack_height: 0.0,
            size: Size::ZERO,
            mirror_about_x: None,
            degenerate,
        }
    }

    /// Mirror the run about the horizontal midpoint of its inked width
    pub fn mirrored_in_place(mut self) -> Self {
        self.mirror_about_x = Some(self.size.w / 2.0 - self.stroke_width / 2.0);
        self
    }

    /// Rotation the run ends up with, spin included
    pub fn applied_rotation(&self) -> Angle {
        if self.spin_applied {
            (self.rotation + Angle(180.0)).normalized()
        } else {
            self.rotation
        }
    }

    /// Map a point of the local text frame to an offset from the element origin
    pub fn transform(&self, local: Point) -> Offset {
        let mut q: DVec2 = local.vec();
        if let Some(axis) = self.mirror_about_x {
            q.x = 2.0 * axis - q.x;
        }
        if self.spin_applied {
            q = self.pivot.vec() * 2.0 - q;
        }
        self.place(q + self.translate.vec())
    }

    fn place(&self, mut q: DVec2) -> Offset {
        if self.mirror {
            q.x = -q.x;
        }
        self.rotation.rotate(Offset::from(q))
    }

    /// The inked block after spin and translation, before mirror and rotation.
    /// Mirroring in place leaves it unchanged.
    pub fn block(&self) -> BBox {
        let mut bb = BBox::new();
        if self.size == Size::ZERO {
            return bb;
        }
        let half_w = self.size.w / 2.0;
        let half_h = self.size.h / 2.0;
        let c = self.pivot + self.translate;
        bb.expand_point(Point::new(c.x - half_w, c.y - half_h));
        bb.expand_point(Point::new(c.x + half_w, c.y + half_h));
        bb
    }

    /// The four corners of the inked block as offsets from the element origin
    pub fn corners(&self) -> [Offset; 4] {
        let b = self.block();
        if b.is_empty() {
            return [Offset::ZERO; 4];
        }
        [
            dvec2(b.min.x, b.min.y),
            dvec2(b.max.x, b.min.y),
            dvec2(b.max.x, b.max.y),
            dvec2(b.min.x, b.max.y),
        ]
        .map(|v| self.place(v))
    }
}

/// Lay out a text run with the default configuration
pub fn layout_text(spec: &TextSpec, metrics: TextMetrics) -> TextPlacement {
    layout_text_with(spec, metrics, &LayoutConfig::default())
}

/// Lay out a text run
pub fn layout_text_with(
    spec: &TextSpec,
    metrics: TextMetrics,
    config: &LayoutConfig,
) -> TextPlacement {
    if spec.value.is_empty() {
        return TextPlacement::identity(Some(Degenerate::EmptyText));
    }
    // Also catches NaN
    if !(spec.size > 0.0) {
        warn!(size = spec.size, "text with non-positive size");
        return TextPlacement::identity(Some(Degenerate::ZeroHeightText));
    }

    let mut degenerate = None;
    if spec.ratio > defaults::MAX_TEXT_RATIO {
        warn!(ratio = spec.ratio, "text ratio clamped");
        degenerate = Some(Degenerate::RatioClamped);
    }

    let width = if metrics.width.is_finite() && metrics.width >= 0.0 {
        metrics.width
    } else {
        warn!(width = metrics.width, "unusable measured width");
        degenerate = Some(Degenerate::NonFiniteInput);
        0.0
    };

    let size = spec.size;
    let stroke = spec.stroke_width();
    let lines = metrics.line_count.max(1) as f64;
    let line_spacing =
        size * (f64::from(spec.line_distance_pct) / 100.0 - config.base_font_ascent_factor);
    let stack_height = lines * size + (lines - 1.0) * line_spacing;
    let baseline_to_bottom = (lines - 1.0) * -(size + line_spacing);

    let h = spec.align.horizontal();
    let mut tx = match h {
        HAlign::Left => stroke / 2.0,
        HAlign::Center => -width / 2.0 + stroke / 2.0,
        HAlign::Right => -width + stroke / 2.0,
    };
    let ty = match spec.align.vertical() {
        VAlign::Bottom => -baseline_to_bottom,
        VAlign::Center => stack_height / 2.0 - size,
        VAlign::Top => -size,
    };

    if spec.parent_mirror {
        tx += match h {
            HAlign::Left => -width,
            HAlign::Center => 0.0,
            HAlign::Right => width,
        };
    }

    let spin_applied = spec.needs_spin();
    let placement = TextPlacement {
        pivot: Point::new(width / 2.0 - stroke / 2.0, size - stack_height / 2.0),
        translate: Offset::new(tx, ty),
        rotation: spec.rotation.normalized(),
        spin_applied,
        mirror: spec.mirror,
        effective_size: spec.effective_size(),
        stroke_width: stroke,
        line_spacing,
        stack_height,
        size: Size {
            w: width,
            h: stack_height,
        },
        mirror_about_x: None,
        degenerate,
    };
    trace!(?placement, "text placement");
    placement
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn spec(align: TextAlign) -> TextSpec {
        TextSpec::new("HELLO", 2.0).with_ratio(10).with_align(align)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn ratio_trades_height_for_stroke() {
        let s = TextSpec::new("x", 2.0).with_ratio(10);
        assert!(close(s.effective_size(), 1.8));
        assert!(close(s.stroke_width(), 0.2));
        assert!(close(s.effective_size() + s.stroke_width(), s.size));
    }

    #[test]
    fn bottom_left_block_starts_at_origin() {
        let p = layout_text(&spec(TextAlign::BottomLeft), TextMetrics::single_line(10.0));
        let b = p.block();
        assert!(close(b.min.x, 0.0));
        assert!(close(b.min.y, 0.0));
        assert!(close(b.max.x, 10.0));
        assert!(close(b.max.y, 2.0));
    }

    #[test]
    fn top_right_block_ends_at_origin() {
        let p = layout_text(&spec(TextAlign::TopRight), TextMetrics::single_line(10.0));
        let b = p.block();
        assert!(close(b.max.x, 0.0));
        assert!(close(b.max.y, 0.0));
    }

    #[test]
    fn center_block_is_centred_for_multiline() {
        let p = layout_text(&spec(TextAlign::Center), TextMetrics::new(6.0, 3));
        let b = p.block();
        assert!(close(b.center().x, 0.0));
        assert!(close(b.center().y, 0.0));
        assert!(close(b.height(), p.stack_height));
    }

    #[test]
    fn multiline_stack_height() {
        // spacing = 2 * (0.5 - 0.2) = 0.6; height = 3*2 + 2*0.6
        let p = layout_text(&spec(TextAlign::BottomLeft), TextMetrics::new(6.0, 3));
        assert!(close(p.line_spacing, 0.6));
        assert!(close(p.stack_height, 7.2));
        // bottom line baseline lands on the anchor
        assert!(close(p.translate.dy, 2.0 * (2.0 + 0.6)));
        assert!(close(p.block().min.y, 0.0));
    }

    #[test]
    fn parent_mirror_shifts_by_full_width() {
        let metrics = TextMetrics::single_line(8.0);
        for (align, sign) in [
            (TextAlign::BottomLeft, -1.0),
            (TextAlign::Center, 0.0),
            (TextAlign::TopRight, 1.0),
        ] {
            let plain = layout_text(&spec(align), metrics);
            let mirrored = layout_text(&spec(align).with_parent_mirror(true), metrics);
            assert!(close(mirrored.translate.dx - plain.translate.dx, sign * 8.0));
        }
    }

    #[test]
    fn spin_law() {
        for deg in [0.0, 45.0, 90.0, 135.0, 179.0, 180.0, 225.0, 269.0, 270.0, 300.0, 359.0] {
            let rot = Angle(deg);
            let mirrored = spec(TextAlign::BottomLeft).with_mirror(true).with_rotation(rot);
            let expected = (90.0..180.0).contains(&deg) || (270.0..360.0).contains(&deg);
            let p = layout_text(&mirrored, TextMetrics::single_line(5.0));
            assert_eq!(p.spin_applied, expected, "mirror at {deg}");

            let plain = spec(TextAlign::BottomLeft).with_rotation(rot);
            assert!(!layout_text(&plain, TextMetrics::single_line(5.0)).spin_applied);
        }
    }

    #[test]
    fn explicit_spin_always_applies() {
        let p = layout_text(
            &spec(TextAlign::BottomLeft).with_spin(true),
            TextMetrics::single_line(5.0),
        );
        assert!(p.spin_applied);
        assert_eq!(p.applied_rotation(), Angle(180.0));
    }

    #[test]
    fn spin_keeps_block_in_place() {
        let metrics = TextMetrics::new(7.0, 2);
        let plain = layout_text(&spec(TextAlign::CenterRight), metrics);
        let spun = layout_text(&spec(TextAlign::CenterRight).with_spin(true), metrics);
        // The pivot is the block centre, so a glyph corner lands diagonally opposite
        let corner = Point::new(-plain.stroke_width / 2.0, 0.0);
        let a = plain.transform(corner);
        let b = spun.transform(corner);
        let c = plain.block().center();
        assert!(close(a.dx + b.dx, 2.0 * c.x));
        assert!(close(a.dy + b.dy, 2.0 * c.y));
        assert_eq!(plain.block(), spun.block());
    }

    #[test]
    fn rotation_turns_the_block() {
        let p = layout_text(
            &spec(TextAlign::BottomLeft).with_rotation(Angle(90.0)),
            TextMetrics::single_line(10.0),
        );
        // The far end of the baseline points up after a quarter turn
        let far = p.transform(Point::new(10.0 - p.stroke_width / 2.0, 0.0));
        assert!(close(far.dx, 0.0));
        assert!(close(far.dy, 10.0));
    }

    #[test]
    fn mirror_flips_x() {
        let p = layout_text(
            &spec(TextAlign::BottomLeft).with_mirror(true),
            TextMetrics::single_line(10.0),
        );
        let far = p.transform(Point::new(10.0 - p.stroke_width / 2.0, 0.0));
        assert!(close(far.dx, -10.0));
    }

    #[test]
    fn empty_text_is_identity() {
        let p = layout_text(&TextSpec::new("", 2.0), TextMetrics::default());
        assert_eq!(p, TextPlacement::identity(Some(Degenerate::EmptyText)));
        assert!(p.block().is_empty());
    }

    #[test]
    fn zero_size_is_identity() {
        let p = layout_text(&TextSpec::new("x", 0.0), TextMetrics::single_line(1.0));
        assert_eq!(p.degenerate, Some(Degenerate::ZeroHeightText));
        assert_eq!(p.size, Size::ZERO);
        assert_eq!(p.transform(Point::new(1.0, 1.0)), Offset::new(1.0, 1.0));
    }

    #[test]
    fn oversized_ratio_is_clamped() {
        let p = layout_text(&TextSpec::new("x", 1.0).with_ratio(80), TextMetrics::single_line(1.0));
        assert_eq!(p.degenerate, Some(Degenerate::RatioClamped));
        assert!(close(p.stroke_width, 0.31));
    }

    #[test]
    fn alignment_codes_parse() {
        assert_eq!("top-center".parse::<TextAlign>().unwrap(), TextAlign::TopCenter);
        assert_eq!(TextAlign::try_from(4).unwrap(), TextAlign::Center);
        assert!("middle".parse::<TextAlign>().is_err());
        assert!(TextAlign::try_from(9).is_err());
    }
}
