//! # Unit Types
//!
//! Thin wrappers that keep engineering lengths and display lengths apart.
//! Engineering values (span, width, pier sizes) are in meters; the vector
//! output works in canvas pixels. The SVG transform only converts between the
//! two through [`DisplayScale`].
//!
//! Number formatting for the text outputs also lives here, since all three
//! documents print reals the same way.
//!
//! ## Example
//!
//! ```rust
//! use gad_core::units::{format_real, DisplayScale, Meters, Pixels};
//!
//! let scale = DisplayScale(20.0);
//! assert_eq!(scale.apply(Meters(2.5)), Pixels(50.0));
//! assert_eq!(format_real(20.0), "20.0");
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Add;

// ============================================================================
// Length Units
// ============================================================================

/// Engineering length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Display length in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pixels(pub f64);

/// Pixels per meter used when fitting a layout onto the canvas.
///
/// Not to be confused with the drawing scale (`scale1`/`scale2`) recorded in
/// the parameters, which is a 1:n paper ratio.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayScale(pub f64);

impl DisplayScale {
    /// Convert an engineering length to display pixels
    pub fn apply(self, length: Meters) -> Pixels {
        Pixels(length.0 * self.0)
    }
}

impl Add for Pixels {
    type Output = Pixels;
    fn add(self, rhs: Pixels) -> Pixels {
        Pixels(self.0 + rhs.0)
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Format a real the way the drawing outputs print coordinates.
///
/// Shortest representation that round-trips, always with a fractional part
/// (`20.0`, `-2.0`, `0.30000000000000004`). No rounding is applied.
/// Large exponents carry an explicit sign (`1e+16`) as CAD readers expect.
/// NaN and infinities have no DXF or SVG form and are written as `0.0`.
pub fn format_real(value: f64) -> String {
    if !value.is_finite() {
        return "0.0".to_string();
    }
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
        _ => repr,
    }
}

/// Format the denominator of a 1:n drawing scale (`100`, `62.5`).
pub fn format_ratio(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format_real(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_real_keeps_fraction() {
        assert_eq!(format_real(20.0), "20.0");
        assert_eq!(format_real(-2.0), "-2.0");
        assert_eq!(format_real(9.5), "9.5");
        assert_eq!(format_real(0.0), "0.0");
    }

    #[test]
    fn test_format_real_does_not_round() {
        assert_eq!(format_real(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_format_real_exponents() {
        assert_eq!(format_real(1e16), "1e+16");
        assert_eq!(format_real(-2.5e20), "-2.5e+20");
        assert_eq!(format_real(1e-7), "1e-7");
    }

    #[test]
    fn test_format_real_non_finite_is_zero() {
        assert_eq!(format_real(f64::NAN), "0.0");
        assert_eq!(format_real(f64::INFINITY), "0.0");
        assert_eq!(format_real(f64::NEG_INFINITY), "0.0");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(100.0), "100");
        assert_eq!(format_ratio(62.5), "62.5");
    }

    #[test]
    fn test_display_scale_apply() {
        let scale = DisplayScale(12.5);
        assert_eq!(scale.apply(Meters(4.0)), Pixels(50.0));
        assert_eq!(scale.apply(Meters(-2.0)), Pixels(-25.0));
    }

    #[test]
    fn test_pixel_addition() {
        assert_eq!(Pixels(50.0) + Pixels(10.0), Pixels(60.0));
    }
}
