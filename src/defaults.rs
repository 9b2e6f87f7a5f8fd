//! Default sizes and settings (all in millimetres)

/// Dimension lines stop this many line widths short of the arrow tip
pub const ARROW_GAP_FACTOR: f64 = 2.0;
/// Extension length used when a dimension asks for `ext_length == 0`
pub const AUTO_EXT_LENGTH_FACTOR: f64 = 15.0;
/// Arrowhead length in line widths
pub const ARROW_LENGTH_FACTOR: f64 = 6.0;
/// Arrowhead base width as a fraction of its length
pub const ARROW_ASPECT: f64 = 2.0 / 3.0;
/// Gap between a dimension line and its label, in line widths
pub const LABEL_GAP_FACTOR: f64 = 2.0;
/// Half the arm length of a centre crosshair, in line widths
pub const CROSSHAIR_FACTOR: f64 = 4.0;

/// Fraction of the glyph height the font already puts between lines
pub const BASE_FONT_ASCENT_FACTOR: f64 = 0.2;
/// Largest accepted text ratio (stroke width in % of size)
pub const MAX_TEXT_RATIO: u8 = 31;
/// Advance of one stroke-font glyph as a fraction of the effective size
pub const STROKE_FONT_ADVANCE: f64 = 0.9;

/// Radius of the inversion dot on DOT/DOTCLK pins
pub const PIN_DOT_RADIUS: f64 = 1.0;
/// Half height of the clock chevron
pub const CLOCK_HALF_HEIGHT: f64 = 0.635;
/// Depth of the clock chevron into the symbol
pub const CLOCK_DEPTH: f64 = 1.27;
/// Text size of pin name, pad and direction labels
pub const PIN_TEXT_SIZE: f64 = 1.778;
/// Stroke ratio of pin labels
pub const PIN_TEXT_RATIO: u8 = 8;
/// Distance from the pin to its labels
pub const PIN_LABEL_GAP: f64 = 0.762;

/// Dimension line width (10 mil)
pub const DIMENSION_WIDTH: f64 = 0.254;
/// Dimension label text size
pub const DIMENSION_TEXT_SIZE: f64 = 2.54;
/// Dimension label stroke ratio
pub const DIMENSION_TEXT_RATIO: u8 = 8;
/// Decimal places of a dimension value
pub const DIMENSION_PRECISION: u8 = 2;

/// Millimetres per mil
pub const MM_PER_MIL: f64 = 0.0254;
/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;
