//! WCAG contrast measurements.
//!
//! Used to check that every `on_*` role stays readable on its container.

use material_color_utilities::{contrast, utils::color::linearized};

use crate::Argb;

/// Relative luminance of a color per WCAG 2.1, in `[0, 1]`.
pub fn relative_luminance(color: Argb) -> f64 {
    let r: f64 = linearized(color.red());
    let g: f64 = linearized(color.green());
    let b: f64 = linearized(color.blue());
    (0.2126 * r + 0.7152 * g + 0.0722 * b) / 100.0
}

/// WCAG 2.1 contrast ratio between two colors, in `[1, 21]`.
///
/// The result does not depend on argument order.
pub fn contrast_ratio(a: Argb, b: Argb) -> f64 {
    ratio_of_luminances(relative_luminance(a), relative_luminance(b))
}

/// Contrast ratio between two HCT tones.
///
/// Tones are clamped to `[0, 100]`.
pub fn ratio_of_tones(tone_a: f64, tone_b: f64) -> f64 {
    contrast::ratio_of_tones(tone_a, tone_b)
}

fn ratio_of_luminances(a: f64, b: f64) -> f64 {
    let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
    (lighter + 0.05) / (darker + 0.05)
}
