//! Behavioral properties of the layout engines, exercised through the public API.

use cadgeom::{
    Angle, CurvedSegment, Degenerate, DimensionKind, DimensionSpec, LabelWidths, PathSegment,
    PinLength, PinSpec, Point, Segment, TextAlign, TextMetrics, TextSpec, Unit,
    curve_angle_from_arc, generate_dimension_geometry, layout_pin, layout_text, reconstruct_arc,
};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Deterministic spread of sample segments
fn sample_segments() -> Vec<CurvedSegment> {
    let ends = [
        (p(0.0, 0.0), p(10.0, 0.0)),
        (p(-3.5, 2.0), p(4.25, -7.0)),
        (p(1.0, 1.0), p(1.0, 9.0)),
        (p(100.0, -50.0), p(99.0, -49.0)),
    ];
    let curves = [
        -359.0, -270.0, -180.5, -180.0, -179.5, -90.0, -33.3, -1.0, -0.01, 0.01, 1.0, 45.0, 90.0,
        135.0, 179.0, 179.9, 179.99, 180.0, 180.01, 180.5, 181.0, 270.0, 358.0,
    ];
    ends.iter()
        .flat_map(|&(a, b)| curves.iter().map(move |&c| CurvedSegment::new(a, b, c)))
        .collect()
}

// ============================================================================
// Arc reconstruction
// ============================================================================

#[test]
fn arc_ends_on_p2() {
    for seg in sample_segments() {
        let arc = reconstruct_arc(&seg);
        let end = arc.point_at(1.0);
        assert!(end.approx_eq(seg.p2, 1e-9), "{seg:?} ended at {end}");
        assert!(arc.point_at(0.0).approx_eq(seg.p1, 1e-9));
    }
}

#[test]
fn arc_reconstruction_is_deterministic() {
    for seg in sample_segments() {
        assert_eq!(reconstruct_arc(&seg), reconstruct_arc(&seg));
    }
}

#[test]
fn zero_curve_is_always_a_line() {
    for seg in sample_segments() {
        let straight = CurvedSegment::straight(seg.p1, seg.p2);
        assert!(matches!(reconstruct_arc(&straight), Segment::Line(_)));
    }
}

#[test]
fn sweep_follows_curve_sign() {
    for seg in sample_segments() {
        let arc = reconstruct_arc(&seg);
        let arc = arc.as_arc().expect("non-zero curve gives an arc");
        assert_eq!(arc.sweep_clockwise, seg.curve < 0.0, "curve {}", seg.curve);
        assert_eq!(arc.large_arc, seg.curve.abs() > 180.0);
        assert_eq!(arc.radius_x, arc.radius_y);
    }
}

#[test]
fn curve_angle_round_trips() {
    for seg in sample_segments() {
        let arc = reconstruct_arc(&seg);
        let arc = arc.as_arc().expect("arc");
        let chord = seg.p1.distance(seg.p2);
        let back = curve_angle_from_arc(chord, arc.radius(), arc.sweep_clockwise, arc.large_arc);
        assert!((back - seg.curve).abs() < 1e-6, "{} came back as {back}", seg.curve);
    }
}

// ============================================================================
// Text anchor engine
// ============================================================================

#[test]
fn text_layout_is_idempotent() {
    for align in TextAlign::ALL {
        let spec = TextSpec::new("two\nlines", 1.5)
            .with_align(*align)
            .with_rotation(Angle(135.0))
            .with_mirror(true)
            .with_parent_mirror(true);
        let metrics = TextMetrics::new(6.0, 2);
        let a = layout_text(&spec, metrics);
        let b = layout_text(&spec, metrics);
        assert_eq!(format!("{a:?}"), format!("{b:?}"));
        assert_eq!(a, b);
    }
}

#[test]
fn spin_law_over_the_full_turn() {
    for step in 0..72 {
        let deg = f64::from(step) * 5.0;
        let mirrored = layout_text(
            &TextSpec::new("R1", 1.0).with_mirror(true).with_rotation(Angle(deg)),
            TextMetrics::single_line(2.0),
        );
        let expected = (90.0..180.0).contains(&deg) || (270.0..360.0).contains(&deg);
        assert_eq!(mirrored.spin_applied, expected, "mirrored at {deg}");

        let plain = layout_text(
            &TextSpec::new("R1", 1.0).with_rotation(Angle(deg)),
            TextMetrics::single_line(2.0),
        );
        assert!(!plain.spin_applied, "plain at {deg}");
    }
}

#[test]
fn zero_height_text_is_a_no_op() {
    let placement = layout_text(&TextSpec::new("x", -1.0), TextMetrics::single_line(3.0));
    assert_eq!(placement.degenerate, Some(Degenerate::ZeroHeightText));
    assert!(placement.block().is_empty());
}

// ============================================================================
// Dimensions
// ============================================================================

#[test]
fn horizontal_dimension_example() {
    let spec = DimensionSpec::new(DimensionKind::Horizontal, p(0.0, 0.0), p(10.0, 0.0), p(5.0, 5.0))
        .with_width(0.254)
        .with_ext_length(0.0)
        .with_precision(2)
        .with_unit(Unit::Mm)
        .with_visible(true);
    let dim = generate_dimension_geometry(&spec);
    insta::assert_snapshot!(dim.measured_value, @"10.00mm");

    let line = dim.dim_line.as_line().expect("straight");
    assert_eq!(line.start, p(0.0, 5.0));
    assert_eq!(line.end, p(10.0, 5.0));
}

#[test]
fn radius_outside_example() {
    let spec = DimensionSpec::new(DimensionKind::Radius, p(0.0, 0.0), p(10.0, 0.0), p(15.0, 0.0));
    let dim = generate_dimension_geometry(&spec);
    let line = dim.dim_line.as_line().expect("straight");
    assert_eq!(line.start, p(10.0, 0.0));
    assert_eq!(line.end, p(15.0, 0.0));
}

#[test]
fn measured_values_across_units() {
    let values: Vec<String> = Unit::ALL
        .iter()
        .map(|unit| {
            let (p1, p2, p3) = (p(0.0, 0.0), p(3.0, 4.0), p(0.0, 5.0));
            let spec = DimensionSpec::new(DimensionKind::Parallel, p1, p2, p3)
                .with_unit(*unit)
                .with_precision(1);
            generate_dimension_geometry(&spec).measured_value
        })
        .collect();
    insta::assert_snapshot!(values.join(" "), @"5000.0mic 5.0mm 196.9mil 0.2in");
}

#[test]
fn degenerate_dimension_reports_zero() {
    for kind in [DimensionKind::Parallel, DimensionKind::Horizontal, DimensionKind::Vertical] {
        let spec = DimensionSpec::new(kind, p(1.0, 1.0), p(1.0, 1.0), p(4.0, 4.0));
        let dim = generate_dimension_geometry(&spec);
        assert_eq!(dim.measured_value, "0");
        assert_eq!(dim.dim_line.length(), 0.0);
        assert!(dim.segments().iter().all(|s| s.start().is_finite() && s.end().is_finite()));
    }
}

// ============================================================================
// Pins
// ============================================================================

#[test]
fn pin_placeholder_example() {
    let spec = PinSpec::new("A").with_length(PinLength::Middle);
    assert_eq!(spec.pad_value, None);
    let pin = layout_pin(&spec, LabelWidths::default()).expect("valid pin");
    assert_eq!(pin.pad.text.value, "99");
}

#[test]
fn invalid_pin_rotation_is_a_diagnostic() {
    use miette::Diagnostic;

    let spec = PinSpec::new("A").with_rotation(Angle(12.5));
    let err = layout_pin(&spec, LabelWidths::default()).expect_err("not a right angle");
    assert_eq!(err.to_string(), "pin rotation 12.5 is not a right angle");
    assert!(err.code().is_some());
}
