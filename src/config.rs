//! Layout configuration.
//!
//! Every tunable constant the engines use, gathered in one plain struct. The
//! defaults come from [`crate::defaults`]; hosts that draw with a different
//! house style build their own `LayoutConfig` and pass it to the `*_with`
//! entry points.

use crate::defaults;

/// Tunable layout constants (mm or factors of a line width)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub arrow_gap_factor: f64,
    pub auto_ext_length_factor: f64,
    pub arrow_length_factor: f64,
    pub arrow_aspect: f64,
    pub label_gap_factor: f64,
    pub crosshair_factor: f64,
    pub base_font_ascent_factor: f64,
    pub pin_dot_radius: f64,
    pub clock_half_height: f64,
    pub clock_depth: f64,
    pub pin_text_size: f64,
    pub pin_text_ratio: u8,
    pub pin_label_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            arrow_gap_factor: defaults::ARROW_GAP_FACTOR,
            auto_ext_length_factor: defaults::AUTO_EXT_LENGTH_FACTOR,
            arrow_length_factor: defaults::ARROW_LENGTH_FACTOR,
            arrow_aspect: defaults::ARROW_ASPECT,
            label_gap_factor: defaults::LABEL_GAP_FACTOR,
            crosshair_factor: defaults::CROSSHAIR_FACTOR,
            base_font_ascent_factor: defaults::BASE_FONT_ASCENT_FACTOR,
            pin_dot_radius: defaults::PIN_DOT_RADIUS,
            clock_half_height: defaults::CLOCK_HALF_HEIGHT,
            clock_depth: defaults::CLOCK_DEPTH,
            pin_text_size: defaults::PIN_TEXT_SIZE,
            pin_text_ratio: defaults::PIN_TEXT_RATIO,
            pin_label_gap: defaults::PIN_LABEL_GAP,
        }
    }
}

impl LayoutConfig {
    /// Gap between a dimension line end and its arrow tip
    pub fn arrow_gap(&self, width: f64) -> f64 {
        width * self.arrow_gap_factor
    }

    /// Extension length, resolving 0 to the automatic length
    pub fn ext_length(&self, width: f64, ext_length: f64) -> f64 {
        if ext_length == 0.0 {
            width * self.auto_ext_length_factor
        } else {
            ext_length
        }
    }

    /// Arrowhead (length, base width) for a line width
    pub fn arrow_size(&self, width: f64) -> (f64, f64) {
        let len = width * self.arrow_length_factor;
        (len, len * self.arrow_aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_ext_length_is_fifteen_widths() {
        let cfg = LayoutConfig::default();
        assert_eq!(cfg.ext_length(0.2, 0.0), 3.0);
        assert_eq!(cfg.ext_length(0.2, 1.5), 1.5);
    }

    #[test]
    fn arrow_gap_is_two_widths() {
        assert_eq!(LayoutConfig::default().arrow_gap(0.25), 0.5);
    }
}
