//! HCT: hue, chroma and tone.
//!
//! Hue and chroma come from CAM16, tone is CIE L*. Tone is what makes the
//! space useful for theming: two colors with tones 40 apart have a contrast
//! ratio of at least 3:1 regardless of their hues.
//!
//! ## Usage
//!
//! ```
//! use toqan_color::{Argb, Hct};
//!
//! let purple = Hct::from_argb(Argb(0xff6750a4));
//! let lighter = Hct::from(purple.hue(), purple.chroma(), 80.0);
//! assert!(lighter.tone() > purple.tone());
//! ```

use std::fmt;

use material_color_utilities::hct as cam;
use tracing::warn;

use crate::Argb;

/// A color expressed as hue, chroma and tone.
///
/// An `Hct` is always backed by a real sRGB color: the stored components are
/// measured from the resolved [`Argb`], so they may differ slightly from the
/// values that were asked for.
///
/// Measuring and solving go through `material_color_utilities`; this type
/// keeps the results as plain `Copy` data so palettes and schemes can share
/// them across threads.
#[derive(Clone, Copy, PartialEq)]
pub struct Hct {
    hue: f64,
    chroma: f64,
    tone: f64,
    argb: Argb,
}

impl Hct {
    /// Resolves `(hue, chroma, tone)` to the closest displayable color.
    ///
    /// When the chroma is not reachable at that hue and tone, chroma is
    /// reduced; hue and tone are kept. Non-finite components are read as 0.
    pub fn from(hue: f64, chroma: f64, tone: f64) -> Self {
        let finite = |value: f64| if value.is_finite() { value } else { 0.0 };
        Self::measured(&cam::Hct::from(finite(hue), finite(chroma), finite(tone)))
    }

    /// Measures an sRGB color.
    pub fn from_argb(argb: Argb) -> Self {
        Self::measured(&cam::Hct::from_int(argb.0))
    }

    fn measured(hct: &cam::Hct) -> Self {
        Self {
            hue: hct.hue(),
            chroma: hct.chroma(),
            tone: hct.tone(),
            argb: Argb(hct.to_int()),
        }
    }

    /// Hue angle in degrees, `[0, 360)`.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Colorfulness. The sRGB maximum depends on hue and tone.
    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    /// Perceptual lightness, `[0, 100]`.
    pub fn tone(&self) -> f64 {
        self.tone
    }

    /// The backing sRGB color.
    pub fn to_argb(&self) -> Argb {
        self.argb
    }

    /// Lowercase `#rrggbb` of the backing color.
    pub fn to_hex(&self) -> String {
        self.argb.to_hex()
    }

    /// A copy with a new hue, keeping the current chroma and tone targets.
    pub fn with_hue(&self, hue: f64) -> Self {
        Self::from(hue, self.chroma, self.tone)
    }

    /// A copy with a new chroma, keeping the current hue and tone.
    pub fn with_chroma(&self, chroma: f64) -> Self {
        Self::from(self.hue, chroma, self.tone)
    }

    /// A copy with a new tone, keeping the current hue and chroma.
    pub fn with_tone(&self, tone: f64) -> Self {
        Self::from(self.hue, self.chroma, tone)
    }
}

impl fmt::Debug for Hct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hct(h: {:.2}, c: {:.2}, t: {:.2}, {})",
            self.hue, self.chroma, self.tone, self.argb
        )
    }
}

impl From<Argb> for Hct {
    fn from(argb: Argb) -> Self {
        Self::from_argb(argb)
    }
}

impl From<Hct> for Argb {
    fn from(hct: Hct) -> Self {
        hct.argb
    }
}

/// `(hue, chroma, tone)` of an sRGB byte triple.
pub fn rgb_to_hct(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let hct = Hct::from_argb(Argb::from_rgb_u8(r, g, b));
    (hct.hue, hct.chroma, hct.tone)
}

/// Hex string of the displayable color closest to `(hue, chroma, tone)`.
pub fn hct_to_hex(hue: f64, chroma: f64, tone: f64) -> String {
    Hct::from(hue, chroma, tone).to_hex()
}

/// Parses a hex color into HCT without failing loudly.
///
/// Returns `None` for malformed input; the caller keeps whatever value it
/// had before.
pub fn parse_hct(input: &str) -> Option<Hct> {
    match Argb::from_hex(input) {
        Ok(argb) => Some(Hct::from_argb(argb)),
        Err(err) => {
            warn!(%err, "ignoring unparseable color");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::relative_luminance;

    /// Deterministic xorshift sample of opaque colors.
    fn sample_colors(count: usize) -> impl Iterator<Item = Argb> {
        let mut state = 0x9e37_79b9u32;
        (0..count).map(move |_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            Argb(0xff00_0000 | (state & 0x00ff_ffff))
        })
    }

    fn channel_distance(a: Argb, b: Argb) -> u8 {
        a.red()
            .abs_diff(b.red())
            .max(a.green().abs_diff(b.green()))
            .max(a.blue().abs_diff(b.blue()))
    }

    #[test]
    fn test_round_trip_within_one_unit() {
        for color in sample_colors(4000) {
            let (h, c, t) = rgb_to_hct(color.red(), color.green(), color.blue());
            let back = Argb::from_hex(&hct_to_hex(h, c, t)).unwrap();
            assert!(
                channel_distance(color, back) <= 1,
                "{color} came back as {back}"
            );
        }
    }

    #[test]
    fn test_reference_purple_measurements() {
        let hct = Hct::from_argb(Argb(0xff6750a4));
        assert!((hct.hue() - 298.98).abs() < 0.01, "{hct:?}");
        assert!((hct.chroma() - 47.86).abs() < 0.01, "{hct:?}");
        assert!((hct.tone() - 40.08).abs() < 0.01, "{hct:?}");
    }

    #[test]
    fn test_gamut_safety_over_domain() {
        let mut hue = 0.0;
        while hue < 360.0 {
            let mut chroma = 0.0;
            while chroma <= 150.0 {
                for tone in (0..=100).step_by(5) {
                    let hex = hct_to_hex(hue, chroma, f64::from(tone));
                    assert_eq!(hex.len(), 7, "{hex}");
                    assert!(Argb::from_hex(&hex).is_ok(), "{hex}");
                }
                chroma += 25.0;
            }
            hue += 15.0;
        }
    }

    #[test]
    fn test_tone_is_monotonic_in_luminance() {
        for (hue, chroma) in [(0.0, 60.0), (120.0, 90.0), (282.0, 48.0), (210.0, 150.0)] {
            let mut previous = -1.0;
            for tone in 0..=100 {
                let lum = relative_luminance(Hct::from(hue, chroma, f64::from(tone)).to_argb());
                assert!(lum >= previous, "hue {hue} chroma {chroma} tone {tone}");
                previous = lum;
            }
        }
    }

    #[test]
    fn test_setters_preserve_other_components() {
        let base = Hct::from(30.0, 40.0, 50.0);
        let retoned = base.with_tone(80.0);
        assert!((retoned.tone() - 80.0).abs() < 0.5);
        assert!((retoned.hue() - base.hue()).abs() < 2.0);

        let rehued = base.with_hue(200.0);
        assert!((rehued.hue() - 200.0).abs() < 2.0);
        assert!((rehued.tone() - base.tone()).abs() < 0.5);
    }

    #[test]
    fn test_malformed_input_does_not_panic() {
        assert!(parse_hct("not-a-color").is_none());
        assert!(parse_hct("#6750a4").is_some());
        assert_eq!(Hct::from(f64::NAN, 40.0, f64::INFINITY).to_argb(), Argb::BLACK);
    }
}
