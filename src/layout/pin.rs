//! Pin layout engine.
//!
//! A pin is laid out in its own frame: the connection point at the origin and
//! the pin running along +X toward the symbol body, then turned by the pin
//! rotation. Everything in a [`PinPlacement`] is relative to the connection
//! point, already rotated.

use crate::config::LayoutConfig;
use crate::errors::{Degenerate, GeometryError};
use crate::geometry::{Circle, LineSegment};
use crate::log::{debug, warn};
use crate::macros::code_enum;
use crate::types::{Angle, Offset, Point};

use super::measure::TextMetrics;
use super::text::{TextAlign, TextPlacement, TextSpec, layout_text_with};

code_enum! {
    /// Length class of a pin
    pub enum PinLength("pin length") {
        Point = "point",
        Short = "short",
        Middle = "middle",
        Long = "long",
    }
}

impl PinLength {
    /// Drawn length in millimetres
    pub fn mm(self) -> f64 {
        match self {
            PinLength::Point => 0.0,
            PinLength::Short => 2.54,
            PinLength::Middle => 5.08,
            PinLength::Long => 7.62,
        }
    }
}

code_enum! {
    /// Which of the name and pad labels are shown
    pub enum PinVisibility("pin visibility") {
        Off = "off",
        Pin = "pin",
        Pad = "pad",
        Both = "both",
    }
}

impl PinVisibility {
    pub fn shows_name(self) -> bool {
        matches!(self, PinVisibility::Pin | PinVisibility::Both)
    }

    pub fn shows_pad(self) -> bool {
        matches!(self, PinVisibility::Pad | PinVisibility::Both)
    }
}

code_enum! {
    /// Graphic decoration at the symbol end of a pin
    pub enum PinFunction("pin function") {
        None = "none",
        /// Inversion bubble
        Dot = "dot",
        /// Clock chevron
        Clk = "clk",
        DotClk = "dotclk",
    }
}

impl PinFunction {
    pub fn has_dot(self) -> bool {
        matches!(self, PinFunction::Dot | PinFunction::DotClk)
    }

    pub fn has_clock(self) -> bool {
        matches!(self, PinFunction::Clk | PinFunction::DotClk)
    }
}

code_enum! {
    /// Electrical direction, shown in the direction/swap label
    pub enum PinDirection("pin direction") {
        Nc = "nc",
        In = "in",
        Out = "out",
        Io = "io",
        Oc = "oc",
        Pwr = "pwr",
        Pas = "pas",
        Hiz = "hiz",
        Sup = "sup",
    }
}

/// A pin element snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct PinSpec {
    pub length: PinLength,
    /// 0, 90, 180 or 270
    pub rotation: Angle,
    /// Rotation of the containing symbol
    pub parent_rotation: Angle,
    pub parent_mirror: bool,
    pub visibility: PinVisibility,
    pub function: PinFunction,
    pub direction: PinDirection,
    pub swap_level: u8,
    pub name: String,
    /// Pad number; a placeholder is drawn when unassigned
    pub pad_value: Option<String>,
}

impl PinSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            length: PinLength::Middle,
            rotation: Angle::ZERO,
            parent_rotation: Angle::ZERO,
            parent_mirror: false,
            visibility: PinVisibility::Both,
            function: PinFunction::None,
            direction: PinDirection::Io,
            swap_level: 0,
            name: name.into(),
            pad_value: None,
        }
    }

    pub fn with_length(mut self, length: PinLength) -> Self {
        self.length = length;
        self
    }

    pub fn with_rotation(mut self, rotation: Angle) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_parent(mut self, rotation: Angle, mirror: bool) -> Self {
        self.parent_rotation = rotation;
        self.parent_mirror = mirror;
        self
    }

    pub fn with_visibility(mut self, visibility: PinVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_function(mut self, function: PinFunction) -> Self {
        self.function = function;
        self
    }

    pub fn with_direction(mut self, direction: PinDirection, swap_level: u8) -> Self {
        self.direction = direction;
        self.swap_level = swap_level;
        self
    }

    pub fn with_pad(mut self, pad: impl Into<String>) -> Self {
        self.pad_value = Some(pad.into());
        self
    }

    /// Pad text, or one "9" per length ordinal when unassigned
    pub fn pad_text(&self) -> String {
        self.pad_value
            .clone()
            .unwrap_or_else(|| "9".repeat(self.length.ordinal()))
    }

    pub fn dir_swap_text(&self) -> String {
        format!("{} {}", self.direction, self.swap_level)
    }

    /// Label text specs, without placement, for measuring
    pub fn label_specs(&self, config: &LayoutConfig) -> [TextSpec; 3] {
        let spec = |value: String| {
            TextSpec::new(value, config.pin_text_size).with_ratio(config.pin_text_ratio)
        };
        [
            spec(self.name.clone()),
            spec(self.pad_text()),
            spec(self.dir_swap_text()),
        ]
    }
}

/// Measured widths of the three pin labels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelWidths {
    pub name: f64,
    pub pad: f64,
    pub dir_swap: f64,
}

/// One positioned pin label
#[derive(Debug, Clone, PartialEq)]
pub struct PinLabel {
    pub text: TextSpec,
    /// Text element origin, relative to the connection point
    pub anchor: Point,
    pub placement: TextPlacement,
    /// Hidden labels keep their geometry so toggling visibility does not move them
    pub visible: bool,
}

/// Everything needed to draw one pin
#[derive(Debug, Clone, PartialEq)]
pub struct PinPlacement {
    pub line: LineSegment,
    pub dot: Option<Circle>,
    pub clock: Option<[LineSegment; 2]>,
    pub name: PinLabel,
    pub pad: PinLabel,
    pub dir_swap: PinLabel,
    /// Labels were spun to stay upright
    pub flipped: bool,
    pub degenerate: Option<Degenerate>,
}

impl PinPlacement {
    pub fn labels(&self) -> [&PinLabel; 3] {
        [&self.name, &self.pad, &self.dir_swap]
    }

    /// Stroked segments: the pin line, then the chevron arms
    pub fn segments(&self) -> Vec<LineSegment> {
        let mut out = vec![self.line];
        if let Some(clock) = self.clock {
            out.extend(clock);
        }
        out
    }
}

/// Lay out a pin with the default configuration
pub fn layout_pin(spec: &PinSpec, widths: LabelWidths) -> Result<PinPlacement, GeometryError> {
    layout_pin_with(spec, widths, &LayoutConfig::default())
}

/// Lay out a pin
pub fn layout_pin_with(
    spec: &PinSpec,
    widths: LabelWidths,
    config: &LayoutConfig,
) -> Result<PinPlacement, GeometryError> {
    let rotation = right_angle(spec.rotation)?;
    let visual = (rotation + spec.parent_rotation).normalized();
    let flipped = is_quarter(visual, 180.0) || is_quarter(visual, 270.0);

    let length = spec.length.mm();
    let dot_radius = if spec.function.has_dot() {
        config.pin_dot_radius
    } else {
        0.0
    };
    let mut degenerate = None;
    let mut line_len = length - 2.0 * dot_radius;
    if line_len < 0.0 {
        warn!(length = %spec.length, "pin shorter than its dot");
        degenerate = Some(Degenerate::NegativePinLine);
        line_len = 0.0;
    }
    debug!(line_len, %visual, flipped, "pin layout");

    let place = |x: f64, y: f64| Point::ORIGIN + rotation.rotate(Offset::new(x, y));

    let line = LineSegment::new(Point::ORIGIN, place(line_len, 0.0));
    let dot = spec.function.has_dot().then(|| Circle {
        center: place(line_len + dot_radius, 0.0),
        radius: dot_radius,
    });
    let clock = spec.function.has_clock().then(|| {
        let (h, d) = (config.clock_half_height, config.clock_depth);
        [
            LineSegment::new(place(length, h), place(length + d, 0.0)),
            LineSegment::new(place(length, -h), place(length + d, 0.0)),
        ]
    });

    let [name_text, pad_text, dir_text] = spec.label_specs(config);
    let label = |text: TextSpec, align: TextAlign, x: f64, y: f64, width: f64, visible: bool| {
        let text = text
            .with_align(align)
            .with_rotation(rotation)
            .with_spin(flipped);
        let mut placement = layout_text_with(&text, TextMetrics::single_line(width), config);
        if spec.parent_mirror {
            placement = placement.mirrored_in_place();
        }
        PinLabel {
            anchor: place(x, y),
            text,
            placement,
            visible,
        }
    };

    let gap = config.pin_label_gap;
    let name_x = length + gap + clock.map_or(0.0, |_| config.clock_depth);
    let mid = line_len / 2.0;

    Ok(PinPlacement {
        line,
        dot,
        clock,
        name: label(
            name_text,
            TextAlign::CenterLeft,
            name_x,
            0.0,
            widths.name,
            spec.visibility.shows_name(),
        ),
        pad: label(
            pad_text,
            TextAlign::BottomCenter,
            mid,
            gap,
            widths.pad,
            spec.visibility.shows_pad(),
        ),
        dir_swap: label(dir_text, TextAlign::TopCenter, mid, -gap, widths.dir_swap, true),
        flipped,
        degenerate,
    })
}

fn is_quarter(angle: Angle, deg: f64) -> bool {
    (angle.deg() - deg).abs() < 1e-9
}

/// Normalize a pin rotation, rejecting anything but a right angle
fn right_angle(rotation: Angle) -> Result<Angle, GeometryError> {
    let r = rotation.normalized();
    if !rotation.deg().is_finite() || ![0.0, 90.0, 180.0, 270.0].iter().any(|&q| is_quarter(r, q)) {
        return Err(GeometryError::InvalidPinRotation {
            rotation: rotation.deg(),
        });
    }
    Ok(Angle(r.deg().round()))
}
