//! The packed sRGB color type used throughout the theme engine.
//!
//! ## Usage
//!
//! Parse user input with [`Argb::from_hex`] (or the lenient
//! [`Argb::parse_or`]) and hand the result to the palette and theme builders.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;
use material_color_utilities::utils::math::sanitize_degrees;
use tracing::warn;

/// An sRGB color packed as `0xAARRGGBB`.
///
/// This is the value every conversion in the crate starts from and resolves
/// to. Hex strings, byte triples, HSL and HCT are all views over it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Argb(pub u32);

impl Argb {
    // --- Common Colors ---
    /// Opaque black.
    pub const BLACK: Argb = Argb(0xff00_0000);
    /// Opaque white.
    pub const WHITE: Argb = Argb(0xffff_ffff);
    /// Fully transparent black.
    pub const TRANSPARENT: Argb = Argb(0x0000_0000);
    /// Material's baseline purple, the default source color.
    pub const BASELINE: Argb = Argb(0xff67_50a4);
    /// Fallback used when an image yields no usable color.
    pub const GOOGLE_BLUE: Argb = Argb(0xff42_85f4);

    /// Creates a color from four `u8` values (alpha, red, green, blue).
    #[inline]
    pub const fn from_argb_u8(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Creates an opaque color from three `u8` values (red, green, blue).
    #[inline]
    pub const fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb_u8(255, r, g, b)
    }

    /// Alpha channel.
    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn alpha_fraction(self) -> f64 {
        f64::from(self.alpha()) / 255.0
    }

    /// Whether the alpha channel is fully opaque.
    pub const fn is_opaque(self) -> bool {
        self.alpha() == 255
    }

    /// Returns the same color with a different alpha byte.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self::from_argb_u8(alpha, self.red(), self.green(), self.blue())
    }

    /// The `(r, g, b)` byte triple.
    pub const fn to_rgb(self) -> (u8, u8, u8) {
        (self.red(), self.green(), self.blue())
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    ///
    /// 8-digit input carries alpha in the last byte.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !matches!(digits.len(), 6 | 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidFormat(input.to_string()));
        }

        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::InvalidFormat(input.to_string()))
        };
        let r = byte(0..2)?;
        let g = byte(2..4)?;
        let b = byte(4..6)?;
        let a = if digits.len() == 8 { byte(6..8)? } else { 255 };

        Ok(Self::from_argb_u8(a, r, g, b))
    }

    /// Parses a hex color, falling back to `fallback` when the input is
    /// malformed.
    ///
    /// Failures are logged at `warn` level.
    pub fn parse_or(input: &str, fallback: Argb) -> Argb {
        match Self::from_hex(input) {
            Ok(color) => color,
            Err(err) => {
                warn!(%err, fallback = %fallback, "falling back to previous color");
                fallback
            }
        }
    }

    /// Lowercase `#rrggbb`; alpha is dropped.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
    }

    /// Lowercase `#rrggbbaa`.
    pub fn to_hex_with_alpha(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.red(),
            self.green(),
            self.blue(),
            self.alpha()
        )
    }

    /// Converts to HSL.
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.red()) / 255.0;
        let g = f64::from(self.green()) / 255.0;
        let b = f64::from(self.blue()) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let delta = max - min;
        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        let h = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Hsl { h: h * 60.0, s, l }
    }
}

/// The default color is opaque black, the same value picker fallbacks use.
impl Default for Argb {
    #[inline]
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Debug for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argb({})", self.to_hex_with_alpha())
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Argb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// --- From Conversions ---

impl From<u32> for Argb {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Argb> for u32 {
    #[inline]
    fn from(color: Argb) -> Self {
        color.0
    }
}

impl From<[u8; 3]> for Argb {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_rgb_u8(r, g, b)
    }
}

impl From<(u8, u8, u8)> for Argb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::from_rgb_u8(r, g, b)
    }
}

impl Serialize for Argb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_opaque() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_str(&self.to_hex_with_alpha())
        }
    }
}

impl<'de> Deserialize<'de> for Argb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Argb::from_hex(&raw).map_err(de::Error::custom)
    }
}

/// Errors that can occur when parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The input is not 6 or 8 hex digits.
    #[error("invalid color `{0}`: expected #rrggbb or #rrggbbaa")]
    InvalidFormat(String),
}

/// A color in HSL: hue in degrees, saturation and lightness in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
    /// Saturation, `[0, 1]`.
    pub s: f64,
    /// Lightness, `[0, 1]`.
    pub l: f64,
}

impl Hsl {
    /// Creates an HSL color; hue is wrapped, saturation and lightness are
    /// clamped.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: sanitize_degrees(h),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
        }
    }

    /// Converts back to an opaque [`Argb`].
    pub fn to_argb(self) -> Argb {
        let h = sanitize_degrees(self.h) / 360.0;
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        let to_byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Argb::from_rgb_u8(to_byte(r), to_byte(g), to_byte(b))
    }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
