//! Core colors and the six tonal palettes derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Argb, Hct, TonalPalette, harmonize::harmonize};

/// Chroma floor for the primary palette when deriving from a source color.
const PRIMARY_MIN_CHROMA: f64 = 48.0;
const SECONDARY_CHROMA: f64 = 16.0;
const TERTIARY_CHROMA: f64 = 24.0;
const TERTIARY_HUE_OFFSET: f64 = 60.0;
const NEUTRAL_CHROMA: f64 = 4.0;
const NEUTRAL_VARIANT_CHROMA: f64 = 8.0;
const ERROR_HUE: f64 = 25.0;
const ERROR_CHROMA: f64 = 84.0;

/// Names the six core palettes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaletteKey {
    /// Main accent.
    Primary,
    /// Less prominent accent.
    Secondary,
    /// Contrasting accent.
    Tertiary,
    /// Error states.
    Error,
    /// Surfaces and backgrounds.
    Neutral,
    /// Outlines and medium-emphasis surfaces.
    NeutralVariant,
}

impl PaletteKey {
    /// Every key in export order.
    pub const ALL: [PaletteKey; 6] = [
        PaletteKey::Primary,
        PaletteKey::Secondary,
        PaletteKey::Tertiary,
        PaletteKey::Error,
        PaletteKey::Neutral,
        PaletteKey::NeutralVariant,
    ];

    /// camelCase name used in JSON documents.
    pub const fn name(self) -> &'static str {
        match self {
            PaletteKey::Primary => "primary",
            PaletteKey::Secondary => "secondary",
            PaletteKey::Tertiary => "tertiary",
            PaletteKey::Error => "error",
            PaletteKey::Neutral => "neutral",
            PaletteKey::NeutralVariant => "neutralVariant",
        }
    }

    /// kebab-case name used in CSS custom properties.
    pub const fn css_name(self) -> &'static str {
        match self {
            PaletteKey::NeutralVariant => "neutral-variant",
            other => other.name(),
        }
    }
}

impl fmt::Display for PaletteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User overrides for the six seed colors.
///
/// `None` means "derive from the source color".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreColors {
    /// Primary seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<Argb>,
    /// Secondary seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<Argb>,
    /// Tertiary seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tertiary: Option<Argb>,
    /// Error seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Argb>,
    /// Neutral seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neutral: Option<Argb>,
    /// Neutral variant seed.
    #[serde(default, alias = "neutral_variant", skip_serializing_if = "Option::is_none")]
    pub neutral_variant: Option<Argb>,
}

impl CoreColors {
    /// The override for `key`, if any.
    pub fn get(&self, key: PaletteKey) -> Option<Argb> {
        match key {
            PaletteKey::Primary => self.primary,
            PaletteKey::Secondary => self.secondary,
            PaletteKey::Tertiary => self.tertiary,
            PaletteKey::Error => self.error,
            PaletteKey::Neutral => self.neutral,
            PaletteKey::NeutralVariant => self.neutral_variant,
        }
    }

    /// Sets or clears the override for `key`.
    pub fn set(&mut self, key: PaletteKey, color: Option<Argb>) {
        let slot = match key {
            PaletteKey::Primary => &mut self.primary,
            PaletteKey::Secondary => &mut self.secondary,
            PaletteKey::Tertiary => &mut self.tertiary,
            PaletteKey::Error => &mut self.error,
            PaletteKey::Neutral => &mut self.neutral,
            PaletteKey::NeutralVariant => &mut self.neutral_variant,
        };
        *slot = color;
    }

    /// Whether no override is set.
    pub fn is_empty(&self) -> bool {
        PaletteKey::ALL.iter().all(|&key| self.get(key).is_none())
    }
}

/// The six palettes a scheme samples from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorePalettes {
    /// Primary accent palette.
    pub primary: TonalPalette,
    /// Secondary accent palette.
    pub secondary: TonalPalette,
    /// Tertiary accent palette.
    pub tertiary: TonalPalette,
    /// Error palette.
    pub error: TonalPalette,
    /// Neutral palette.
    pub neutral: TonalPalette,
    /// Neutral variant palette.
    pub neutral_variant: TonalPalette,
}

impl CorePalettes {
    /// Material's standard derivation from a single source color.
    ///
    /// Secondary keeps the source hue at low chroma, tertiary rotates it by
    /// 60°, the neutrals are near-gray tints of the source hue, and error is
    /// a fixed red.
    pub fn from_source(source: Argb) -> Self {
        let hct = Hct::from_argb(source);
        let hue = hct.hue();
        Self {
            primary: TonalPalette::from_hue_and_chroma(hue, hct.chroma().max(PRIMARY_MIN_CHROMA)),
            secondary: TonalPalette::from_hue_and_chroma(hue, SECONDARY_CHROMA),
            tertiary: TonalPalette::from_hue_and_chroma(hue + TERTIARY_HUE_OFFSET, TERTIARY_CHROMA),
            error: TonalPalette::from_hue_and_chroma(ERROR_HUE, ERROR_CHROMA),
            neutral: TonalPalette::from_hue_and_chroma(hue, NEUTRAL_CHROMA),
            neutral_variant: TonalPalette::from_hue_and_chroma(hue, NEUTRAL_VARIANT_CHROMA),
        }
    }

    /// Derivation from a source color plus user overrides.
    ///
    /// Roles without an override follow [`Self::from_source`]. An override
    /// seeds its palette with its own hue and chroma when `color_match` is
    /// set; otherwise it is harmonized toward `source` first.
    ///
    /// With no overrides, `color_match` has no effect: derived colors are
    /// already related to the source.
    pub fn from_core_colors(source: Argb, core: &CoreColors, color_match: bool) -> Self {
        let mut palettes = Self::from_source(source);
        for key in PaletteKey::ALL {
            let Some(color) = core.get(key) else {
                continue;
            };
            let seed = if color_match {
                color
            } else {
                harmonize(color, source)
            };
            debug!(%key, %color, %seed, color_match, "seeding palette from override");
            palettes.set(key, TonalPalette::from_argb(seed));
        }
        palettes
    }

    /// The palette for `key`.
    pub fn get(&self, key: PaletteKey) -> &TonalPalette {
        match key {
            PaletteKey::Primary => &self.primary,
            PaletteKey::Secondary => &self.secondary,
            PaletteKey::Tertiary => &self.tertiary,
            PaletteKey::Error => &self.error,
            PaletteKey::Neutral => &self.neutral,
            PaletteKey::NeutralVariant => &self.neutral_variant,
        }
    }

    fn set(&mut self, key: PaletteKey, palette: TonalPalette) {
        match key {
            PaletteKey::Primary => self.primary = palette,
            PaletteKey::Secondary => self.secondary = palette,
            PaletteKey::Tertiary => self.tertiary = palette,
            PaletteKey::Error => self.error = palette,
            PaletteKey::Neutral => self.neutral = palette,
            PaletteKey::NeutralVariant => self.neutral_variant = palette,
        }
    }

    /// `(key, palette)` pairs in export order.
    pub fn iter(&self) -> impl Iterator<Item = (PaletteKey, &TonalPalette)> {
        PaletteKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use material_color_utilities::utils::math::sanitize_degrees;

    const SOURCE: Argb = Argb::BASELINE;

    #[test]
    fn test_default_derivation_reference_tones() {
        let palettes = CorePalettes::from_source(SOURCE);
        assert_eq!(palettes.primary.tone(40.0), Argb(0xff6750a4));
        assert_eq!(palettes.secondary.tone(40.0), Argb(0xff625b71));
        assert_eq!(palettes.tertiary.tone(40.0), Argb(0xff7e5260));
        assert_eq!(palettes.error.tone(40.0), Argb(0xffba1a1a));
        assert_eq!(palettes.neutral.tone(99.0), Argb(0xfffffbff));
    }

    #[test]
    fn test_default_derivation_offsets() {
        let palettes = CorePalettes::from_source(SOURCE);
        let hue = Hct::from_argb(SOURCE).hue();
        assert_eq!(palettes.secondary.hue(), hue);
        assert!((palettes.tertiary.hue() - sanitize_degrees(hue + 60.0)).abs() < 1e-9);
        assert_eq!(palettes.neutral.chroma(), NEUTRAL_CHROMA);
        assert_eq!(palettes.neutral_variant.chroma(), NEUTRAL_VARIANT_CHROMA);
        assert_eq!(palettes.primary.chroma(), PRIMARY_MIN_CHROMA);
    }

    #[test]
    fn test_low_chroma_source_still_gets_colorful_primary() {
        let palettes = CorePalettes::from_source(Argb(0xff808080));
        assert_eq!(palettes.primary.chroma(), PRIMARY_MIN_CHROMA);
    }

    #[test]
    fn test_exact_override_keeps_hue() {
        let override_color = Argb(0xff00c853);
        let core = CoreColors {
            secondary: Some(override_color),
            ..CoreColors::default()
        };
        let palettes = CorePalettes::from_core_colors(SOURCE, &core, true);
        let expected = Hct::from_argb(override_color);
        assert_eq!(palettes.secondary.hue(), expected.hue());
        assert_eq!(palettes.secondary.chroma(), expected.chroma());
        // Untouched roles still follow the source.
        assert_eq!(palettes.tertiary, CorePalettes::from_source(SOURCE).tertiary);
    }

    #[test]
    fn test_harmonized_override_lands_between_hues() {
        let override_color = Argb(0xff00c853);
        let core = CoreColors {
            tertiary: Some(override_color),
            ..CoreColors::default()
        };
        let palettes = CorePalettes::from_core_colors(SOURCE, &core, false);
        let source_hue = Hct::from_argb(SOURCE).hue();
        let override_hue = Hct::from_argb(override_color).hue();
        let hue = palettes.tertiary.hue();
        assert!(override_hue < source_hue);
        assert!(hue > override_hue && hue < source_hue, "{override_hue} < {hue} < {source_hue}");
    }

    #[test]
    fn test_color_match_without_overrides_is_a_no_op() {
        let exact = CorePalettes::from_core_colors(SOURCE, &CoreColors::default(), true);
        let harmonized = CorePalettes::from_core_colors(SOURCE, &CoreColors::default(), false);
        assert_eq!(exact, harmonized);
        assert_eq!(exact, CorePalettes::from_source(SOURCE));
    }

    #[test]
    fn test_core_colors_get_set() {
        let mut core = CoreColors::default();
        assert!(core.is_empty());
        core.set(PaletteKey::NeutralVariant, Some(Argb::WHITE));
        assert_eq!(core.get(PaletteKey::NeutralVariant), Some(Argb::WHITE));
        assert!(!core.is_empty());
        core.set(PaletteKey::NeutralVariant, None);
        assert!(core.is_empty());
    }

    #[test]
    fn test_core_colors_json_shape() {
        let core = CoreColors {
            primary: Some(Argb(0xff6750a4)),
            neutral_variant: Some(Argb(0xff79747e)),
            ..CoreColors::default()
        };
        let json = serde_json::to_value(core).unwrap();
        assert_eq!(json["primary"], "#6750a4");
        assert_eq!(json["neutralVariant"], "#79747e");
        assert!(json.get("secondary").is_none());
    }
}
