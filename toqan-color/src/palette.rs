//! Tonal palettes: one hue and chroma, every tone.

use material_color_utilities::utils::math::sanitize_degrees;

use crate::{Argb, Hct};

/// Highest chroma a palette is allowed to ask for.
pub const MAX_CHROMA: f64 = 150.0;

/// A function from tone to color at a fixed hue and chroma.
///
/// Palettes are cheap: a tone is resolved on request and nothing is cached.
/// When inputs change, build a new palette instead of patching an old one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TonalPalette {
    hue: f64,
    chroma: f64,
}

impl TonalPalette {
    /// The tones written out by exports and shown in palette tables.
    pub const STANDARD_TONES: [u8; 18] = [
        0, 5, 10, 15, 20, 25, 30, 35, 40, 50, 60, 70, 80, 90, 95, 98, 99, 100,
    ];

    /// A palette at `hue` (wrapped into `[0, 360)`) and `chroma` (clamped to
    /// `[0, 150]`).
    pub fn from_hue_and_chroma(hue: f64, chroma: f64) -> Self {
        Self {
            hue: sanitize_degrees(hue),
            chroma: chroma.clamp(0.0, MAX_CHROMA),
        }
    }

    /// A palette with the hue and chroma of `hct`.
    pub fn from_hct(hct: Hct) -> Self {
        Self::from_hue_and_chroma(hct.hue(), hct.chroma())
    }

    /// A palette with the hue and chroma of `argb`.
    pub fn from_argb(argb: Argb) -> Self {
        Self::from_hct(Hct::from_argb(argb))
    }

    /// Hue of every color in the palette.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Requested chroma. Tones near black and white will have less.
    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    /// The color at `tone`, clamped to `[0, 100]`.
    pub fn tone(&self, tone: f64) -> Argb {
        self.hct(tone).to_argb()
    }

    /// The color at `tone` in HCT.
    pub fn hct(&self, tone: f64) -> Hct {
        Hct::from(self.hue, self.chroma, tone.clamp(0.0, 100.0))
    }

    /// `(tone, color)` pairs for [`Self::STANDARD_TONES`].
    pub fn standard_tones(&self) -> impl Iterator<Item = (u8, Argb)> + '_ {
        Self::STANDARD_TONES
            .iter()
            .map(move |&tone| (tone, self.tone(f64::from(tone))))
    }
}
