//! Error types.
//!
//! Two kinds of trouble exist in this crate:
//!
//! - [`GeometryError`]: contract violations (an unknown enum code, a pin
//!   rotation that is not a right angle, mismatched input slices). These are
//!   hard faults returned as `Err`, because guessing geometry would corrupt a
//!   drawing.
//! - [`Degenerate`]: transient degenerate states an element passes through
//!   while being edited (zero-length chords, zero-height text). These are
//!   recovered locally with a safe default and reported alongside the output.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Hard faults
// ============================================================================

/// Contract violations surfaced to the caller
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid {kind} value: {value:?}")]
    #[diagnostic(
        code(cadgeom::enum_code::invalid_value),
        help("expected one of: {expected}")
    )]
    InvalidEnumValue {
        kind: &'static str,
        value: String,
        expected: String,
    },

    #[error("curve angle {curve} is outside (-360, 360)")]
    #[diagnostic(
        code(cadgeom::arc::curve_out_of_range),
        help("a curve angle is the signed sweep of the arc in degrees; 0 means straight")
    )]
    CurveOutOfRange { curve: f64 },

    #[error("polygon has {vertices} vertices but {curves} curve angles")]
    #[diagnostic(
        code(cadgeom::arc::curve_count_mismatch),
        help("every vertex carries the curve of the edge leading to the next vertex")
    )]
    CurveCountMismatch { vertices: usize, curves: usize },

    #[error("pin rotation {rotation} is not a right angle")]
    #[diagnostic(
        code(cadgeom::pin::invalid_rotation),
        help("pins are placed at 0, 90, 180 or 270 degrees")
    )]
    InvalidPinRotation { rotation: f64 },
}

// ============================================================================
// Recovered degenerate input
// ============================================================================

/// A degenerate input that was replaced by a safe default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degenerate {
    /// The two points of a segment or measurement coincide
    ZeroLengthChord,
    /// Text with a non-positive size
    ZeroHeightText,
    /// Text with an empty value
    EmptyText,
    /// An `asin` argument fell outside [-1, 1] and was clamped
    AsinDomain,
    /// A coordinate or angle was NaN or infinite
    NonFiniteInput,
    /// A text ratio above the maximum was clamped
    RatioClamped,
    /// A pin dot is longer than the pin itself
    NegativePinLine,
}

impl std::fmt::Display for Degenerate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Degenerate::ZeroLengthChord => "zero-length chord",
            Degenerate::ZeroHeightText => "zero-height text",
            Degenerate::EmptyText => "empty text",
            Degenerate::AsinDomain => "asin argument outside [-1, 1]",
            Degenerate::NonFiniteInput => "non-finite input",
            Degenerate::RatioClamped => "text ratio clamped",
            Degenerate::NegativePinLine => "pin dot longer than pin",
        };
        f.write_str(msg)
    }
}
