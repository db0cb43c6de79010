//! Hue harmonization: pulling accent colors toward the source color.

use material_color_utilities::{
    blend,
    utils::math::{difference_degrees, rotation_direction, sanitize_degrees},
};

use crate::Argb;

/// Largest hue rotation applied by [`harmonize`], in degrees.
pub const MAX_ROTATION_DEGREES: f64 = 15.0;

/// The hue `design_hue` moves to when harmonized with `source_hue`.
///
/// Rotates along the shorter arc by half the difference, capped at
/// [`MAX_ROTATION_DEGREES`].
pub fn harmonized_hue(design_hue: f64, source_hue: f64) -> f64 {
    let difference = difference_degrees(design_hue, source_hue);
    let rotation = (difference * 0.5).min(MAX_ROTATION_DEGREES);
    sanitize_degrees(design_hue + rotation * rotation_direction(design_hue, source_hue))
}

/// Shifts the hue of `design` toward `source`, keeping chroma and tone.
pub fn harmonize(design: Argb, source: Argb) -> Argb {
    Argb(blend::harmonize(design.0, source.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Hct;

    #[test]
    fn test_small_differences_meet_halfway() {
        assert_eq!(harmonized_hue(100.0, 110.0), 105.0);
        assert_eq!(harmonized_hue(110.0, 100.0), 105.0);
    }

    #[test]
    fn test_rotation_is_capped() {
        assert_eq!(harmonized_hue(100.0, 200.0), 115.0);
        assert_eq!(harmonized_hue(200.0, 100.0), 185.0);
    }

    #[test]
    fn test_rotation_takes_short_arc() {
        assert_eq!(harmonized_hue(350.0, 10.0), 0.0);
        assert_eq!(harmonized_hue(10.0, 350.0), 0.0);
        assert_eq!(harmonized_hue(5.0, 300.0), 350.0);
    }

    #[test]
    fn test_harmonize_keeps_tone() {
        let design = Argb(0xff00c853);
        let source = Argb(0xff6750a4);
        let before = Hct::from_argb(design);
        let after = Hct::from_argb(harmonize(design, source));
        assert!((after.tone() - before.tone()).abs() < 0.5);
        assert_ne!(after.to_argb(), design);
    }

    #[test]
    fn test_harmonize_moves_to_harmonized_hue() {
        let design = Argb(0xff00c853);
        let source = Argb(0xff6750a4);
        let expected = harmonized_hue(
            Hct::from_argb(design).hue(),
            Hct::from_argb(source).hue(),
        );
        let hue = Hct::from_argb(harmonize(design, source)).hue();
        assert!((hue - expected).abs() < 1.0, "{hue} vs {expected}");
        assert!((hue - 164.44).abs() < 1.0, "{hue}");
    }

    #[test]
    fn test_harmonize_with_itself_is_identity() {
        let color = Argb(0xffba1a1a);
        assert_eq!(harmonize(color, color), color);
    }
}
