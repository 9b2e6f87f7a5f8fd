//! The four layout engines
//!
//! This module is organized into submodules:
//! - `arc`: curve-angle segments to renderer arcs, polygon outlines
//! - `measure`: text measurement collaborator and built-in fonts
//! - `text`: text anchor engine (alignment, stacking, spin, mirror compensation)
//! - `dimension`: dimension geometry generator
//! - `pin`: pin layout engine

pub mod arc;
pub mod dimension;
pub mod measure;
pub mod pin;
pub mod text;

// Re-export commonly used items
pub use arc::{
    CurvedSegment, arc_radius, curve_angle_from_arc, reconstruct_arc, reconstruct_arc_checked,
    reconstruct_polygon_path,
};
pub use dimension::{
    DimensionGenerator, DimensionGeometry, DimensionKind, DimensionLabel, DimensionSpec, Unit,
    format_angle, format_measurement, generate_dimension_geometry,
};
pub use measure::{ProportionalFont, StrokeFont, TextMeasure, TextMetrics};
pub use pin::{
    LabelWidths, PinDirection, PinFunction, PinLabel, PinLength, PinPlacement, PinSpec,
    PinVisibility, layout_pin, layout_pin_with,
};
pub use text::{HAlign, TextAlign, TextPlacement, TextSpec, VAlign, layout_text, layout_text_with};
