//! Text measurement collaborator.
//!
//! The text anchor engine needs the width and line count of a rendered run.
//! Hosts usually answer that with their toolkit's font metrics; [`StrokeFont`]
//! answers it for the fixed-advance vector font and [`ProportionalFont`] for a
//! proportional one, so the engine can also run headless.

use crate::defaults;

use super::text::TextSpec;

/// Measured extent of a text run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Width of the widest line, stroke included
    pub width: f64,
    /// Number of lines (at least 1 for non-empty text)
    pub line_count: usize,
}

impl TextMetrics {
    pub const fn new(width: f64, line_count: usize) -> Self {
        Self { width, line_count }
    }

    /// A single line of the given width
    pub const fn single_line(width: f64) -> Self {
        Self { width, line_count: 1 }
    }
}

/// Synchronous text measurement service supplied by the host
pub trait TextMeasure {
    fn measure(&self, text: &TextSpec) -> TextMetrics;
}

impl<F> TextMeasure for F
where
    F: Fn(&TextSpec) -> TextMetrics,
{
    fn measure(&self, text: &TextSpec) -> TextMetrics {
        self(text)
    }
}

/// Metrics of the built-in vector font: every glyph advances by the same
/// fraction of the effective size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeFont {
    pub advance: f64,
}

impl Default for StrokeFont {
    fn default() -> Self {
        Self {
            advance: defaults::STROKE_FONT_ADVANCE,
        }
    }
}

impl TextMeasure for StrokeFont {
    fn measure(&self, text: &TextSpec) -> TextMetrics {
        if text.value.is_empty() || text.size <= 0.0 {
            return TextMetrics::default();
        }
        let widest = text.value.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let line_count = text.value.split('\n').count();
        let width = widest as f64 * self.advance * text.effective_size() + text.stroke_width();
        TextMetrics { width, line_count }
    }
}

/// Advance of printable ASCII glyphs (0x20..=0x7E) in hundredths of the em
#[rustfmt::skip]
const GLYPH_ADVANCE: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Metrics of a proportional font described by per-glyph advances.
/// Characters outside printable ASCII advance one full em.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalFont {
    /// Multiplier applied to the glyph table
    pub scale: f64,
}

impl Default for ProportionalFont {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl ProportionalFont {
    /// Advance of a line in hundredths of the em
    pub fn line_units(line: &str) -> u32 {
        line.chars()
            .map(|c| match c {
                ' '..='~' => u32::from(GLYPH_ADVANCE[c as usize - 0x20]),
                _ => 100,
            })
            .sum()
    }
}

impl TextMeasure for ProportionalFont {
    fn measure(&self, text: &TextSpec) -> TextMetrics {
        if text.value.is_empty() || text.size <= 0.0 {
            return TextMetrics::default();
        }
        let widest = text.value.lines().map(Self::line_units).max().unwrap_or(0);
        let em = text.effective_size() * self.scale;
        TextMetrics {
            width: f64::from(widest) / 100.0 * em + text.stroke_width(),
            line_count: text.value.split('\n').count(),
        }
    }
}
