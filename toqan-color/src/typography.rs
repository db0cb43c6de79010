//! Typefaces and the Material type scale carried alongside a theme.

use serde::{Deserialize, Serialize};

/// Typeface used when none is chosen.
pub const DEFAULT_FONT: &str = "Roboto";

/// Size and line height of one type-scale step, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    /// Font size.
    pub font_size: f32,
    /// Line height.
    pub line_height: f32,
}

impl TypeStyle {
    const fn new(font_size: f32, line_height: f32) -> Self {
        Self {
            font_size,
            line_height,
        }
    }
}

/// The fifteen steps of the Material type scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeScale {
    /// Large display text.
    pub display_large: TypeStyle,
    /// Medium display text.
    pub display_medium: TypeStyle,
    /// Small display text.
    pub display_small: TypeStyle,
    /// Large headline text.
    pub headline_large: TypeStyle,
    /// Medium headline text.
    pub headline_medium: TypeStyle,
    /// Small headline text.
    pub headline_small: TypeStyle,
    /// Large title text.
    pub title_large: TypeStyle,
    /// Medium title text.
    pub title_medium: TypeStyle,
    /// Small title text.
    pub title_small: TypeStyle,
    /// Large body text.
    pub body_large: TypeStyle,
    /// Medium body text.
    pub body_medium: TypeStyle,
    /// Small body text.
    pub body_small: TypeStyle,
    /// Large label text.
    pub label_large: TypeStyle,
    /// Medium label text.
    pub label_medium: TypeStyle,
    /// Small label text.
    pub label_small: TypeStyle,
}

impl Default for TypeScale {
    fn default() -> Self {
        Self {
            display_large: TypeStyle::new(57.0, 64.0),
            display_medium: TypeStyle::new(45.0, 52.0),
            display_small: TypeStyle::new(36.0, 44.0),
            headline_large: TypeStyle::new(32.0, 40.0),
            headline_medium: TypeStyle::new(28.0, 36.0),
            headline_small: TypeStyle::new(24.0, 32.0),
            title_large: TypeStyle::new(22.0, 28.0),
            title_medium: TypeStyle::new(16.0, 24.0),
            title_small: TypeStyle::new(14.0, 20.0),
            body_large: TypeStyle::new(16.0, 24.0),
            body_medium: TypeStyle::new(14.0, 20.0),
            body_small: TypeStyle::new(12.0, 16.0),
            label_large: TypeStyle::new(14.0, 20.0),
            label_medium: TypeStyle::new(12.0, 16.0),
            label_small: TypeStyle::new(11.0, 16.0),
        }
    }
}

impl TypeScale {
    /// `(token, style, uses_display_font)` for every step, largest first.
    ///
    /// Tokens are kebab-case (`"headline-small"`). Display, headline and
    /// title steps use the display typeface; body and label steps use the
    /// body typeface.
    pub fn steps(&self) -> [(&'static str, TypeStyle, bool); 15] {
        [
            ("display-large", self.display_large, true),
            ("display-medium", self.display_medium, true),
            ("display-small", self.display_small, true),
            ("headline-large", self.headline_large, true),
            ("headline-medium", self.headline_medium, true),
            ("headline-small", self.headline_small, true),
            ("title-large", self.title_large, true),
            ("title-medium", self.title_medium, true),
            ("title-small", self.title_small, true),
            ("body-large", self.body_large, false),
            ("body-medium", self.body_medium, false),
            ("body-small", self.body_small, false),
            ("label-large", self.label_large, false),
            ("label-medium", self.label_medium, false),
            ("label-small", self.label_small, false),
        ]
    }
}

/// Font choices for a theme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// Brand typeface for display, headline and title text.
    pub display_font: String,
    /// Plain typeface for body and label text.
    pub body_font: String,
    /// Sizes and line heights.
    #[serde(default)]
    pub scale: TypeScale,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            display_font: DEFAULT_FONT.to_string(),
            body_font: DEFAULT_FONT.to_string(),
            scale: TypeScale::default(),
        }
    }
}

impl Typography {
    /// Typography with the given fonts and the default scale.
    pub fn new(display_font: impl Into<String>, body_font: impl Into<String>) -> Self {
        Self {
            display_font: display_font.into(),
            body_font: body_font.into(),
            scale: TypeScale::default(),
        }
    }
}
