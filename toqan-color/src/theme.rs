//! Theme generation from a source color.
//!
//! A [`Theme`] is an immutable value: every input change produces a new one
//! through [`ThemeBuilder`]. Generation is pure, so the same
//! [`ThemeRequest`] always yields an identical theme.
//!
//! ## Usage
//!
//! ```
//! use toqan_color::{Argb, ExtendedColor, ThemeBuilder};
//!
//! let theme = ThemeBuilder::new(Argb(0xff6750a4))
//!     .extended_color(ExtendedColor::new("success", Argb(0xff00c853)))
//!     .build();
//! assert_eq!(theme.light().primary, Argb(0xff6750a4));
//! assert_eq!(theme.extended_colors().len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Argb, Hct, TonalPalette,
    core_colors::{CoreColors, CorePalettes, PaletteKey},
    harmonize::harmonize,
    scheme::{Mode, Scheme},
};

/// Chroma floor for extended color palettes.
const EXTENDED_MIN_CHROMA: f64 = 48.0;

/// An app-specific color outside the six core roles, such as "success".
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedColor {
    /// Name used in exports, e.g. `success`.
    pub name: String,
    /// Seed color.
    pub color: Argb,
    /// Free-form note shown in the library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether to harmonize `color` toward the theme's source color.
    #[serde(default)]
    pub blend: bool,
}

impl ExtendedColor {
    /// An unblended extended color without a description.
    pub fn new(name: impl Into<String>, color: Argb) -> Self {
        Self {
            name: name.into(),
            color,
            description: None,
            blend: false,
        }
    }

    /// Sets whether the color is harmonized toward the source.
    pub fn with_blend(mut self, blend: bool) -> Self {
        self.blend = blend;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The four roles of an extended color in one mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorGroup {
    /// The accent itself.
    pub color: Argb,
    /// Content on `color`.
    pub on_color: Argb,
    /// Tonal container.
    pub color_container: Argb,
    /// Content on `color_container`.
    pub on_color_container: Argb,
}

impl ColorGroup {
    fn from_palette(palette: &TonalPalette, mode: Mode) -> Self {
        let [color, on_color, container, on_container] = match mode {
            Mode::Light => [40.0, 100.0, 90.0, 10.0],
            Mode::Dark => [80.0, 20.0, 30.0, 90.0],
        };
        Self {
            color: palette.tone(color),
            on_color: palette.tone(on_color),
            color_container: palette.tone(container),
            on_color_container: palette.tone(on_container),
        }
    }

    /// `(suffix, color)` pairs; the suffix is appended to the color name in
    /// exports.
    pub fn entries(&self) -> [(&'static str, Argb); 4] {
        [
            ("color", self.color),
            ("on-color", self.on_color),
            ("color-container", self.color_container),
            ("on-color-container", self.on_color_container),
        ]
    }
}

/// An extended color resolved for both modes.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtendedColorGroup {
    /// The input this group was generated from.
    pub color: ExtendedColor,
    /// The seed after optional blending.
    pub value: Argb,
    /// The palette the groups were sampled from.
    pub palette: TonalPalette,
    /// Light-mode roles.
    pub light: ColorGroup,
    /// Dark-mode roles.
    pub dark: ColorGroup,
}

impl ExtendedColorGroup {
    /// Resolves `color` against `source`.
    pub fn new(color: &ExtendedColor, source: Argb) -> Self {
        let value = if color.blend {
            harmonize(color.color, source)
        } else {
            color.color
        };
        let hct = Hct::from_argb(value);
        let palette =
            TonalPalette::from_hue_and_chroma(hct.hue(), hct.chroma().max(EXTENDED_MIN_CHROMA));
        Self {
            color: color.clone(),
            value,
            palette,
            light: ColorGroup::from_palette(&palette, Mode::Light),
            dark: ColorGroup::from_palette(&palette, Mode::Dark),
        }
    }

    /// The roles for `mode`.
    pub fn group(&self, mode: Mode) -> &ColorGroup {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }
}

/// Every input that determines a [`Theme`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRequest {
    /// The seed color.
    pub source: Argb,
    /// Per-role overrides.
    #[serde(default)]
    pub core_colors: CoreColors,
    /// Use overrides verbatim instead of harmonizing them.
    #[serde(default)]
    pub color_match: bool,
    /// App-specific colors, in order.
    #[serde(default)]
    pub extended_colors: Vec<ExtendedColor>,
}

impl ThemeRequest {
    /// A request for the default derivation from `source`.
    pub fn new(source: Argb) -> Self {
        Self {
            source,
            core_colors: CoreColors::default(),
            color_match: false,
            extended_colors: Vec::new(),
        }
    }
}

/// Builder for [`Theme`].
#[derive(Clone, Debug)]
pub struct ThemeBuilder {
    request: ThemeRequest,
}

impl ThemeBuilder {
    /// Starts from `source` with no overrides.
    pub fn new(source: Argb) -> Self {
        Self {
            request: ThemeRequest::new(source),
        }
    }

    /// Replaces the seed color.
    pub fn source(mut self, source: Argb) -> Self {
        self.request.source = source;
        self
    }

    /// Replaces every override at once.
    pub fn core_colors(mut self, core_colors: CoreColors) -> Self {
        self.request.core_colors = core_colors;
        self
    }

    /// Sets or clears one override.
    pub fn override_color(mut self, key: PaletteKey, color: Option<Argb>) -> Self {
        self.request.core_colors.set(key, color);
        self
    }

    /// Whether overrides are used verbatim.
    pub fn color_match(mut self, color_match: bool) -> Self {
        self.request.color_match = color_match;
        self
    }

    /// Appends an extended color.
    pub fn extended_color(mut self, color: ExtendedColor) -> Self {
        self.request.extended_colors.push(color);
        self
    }

    /// Appends several extended colors.
    pub fn extended_colors(mut self, colors: impl IntoIterator<Item = ExtendedColor>) -> Self {
        self.request.extended_colors.extend(colors);
        self
    }

    /// The request this builder has accumulated.
    pub fn request(&self) -> &ThemeRequest {
        &self.request
    }

    /// Consumes the builder, returning its request.
    pub fn into_request(self) -> ThemeRequest {
        self.request
    }

    /// Generates the theme.
    pub fn build(self) -> Theme {
        Theme::from_request(self.request)
    }
}

impl From<ThemeRequest> for ThemeBuilder {
    fn from(request: ThemeRequest) -> Self {
        Self { request }
    }
}

/// Palettes and schemes for both modes, plus extended colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    request: ThemeRequest,
    palettes: CorePalettes,
    light: Scheme,
    dark: Scheme,
    extended: Vec<ExtendedColorGroup>,
}

impl Theme {
    /// The default theme for `source`.
    pub fn from_source(source: Argb) -> Self {
        Self::from_request(ThemeRequest::new(source))
    }

    /// Generates a theme from every input at once.
    #[tracing::instrument(level = "debug", skip_all, fields(source = %request.source))]
    pub fn from_request(request: ThemeRequest) -> Self {
        let palettes =
            CorePalettes::from_core_colors(request.source, &request.core_colors, request.color_match);
        let light = Scheme::light(&palettes);
        let dark = Scheme::dark(&palettes);
        let extended = request
            .extended_colors
            .iter()
            .map(|color| ExtendedColorGroup::new(color, request.source))
            .collect::<Vec<_>>();
        debug!(
            "Generated theme: primary {} / {}, {} extended colors",
            light.primary,
            dark.primary,
            extended.len()
        );
        Self {
            request,
            palettes,
            light,
            dark,
            extended,
        }
    }

    /// The inputs this theme was generated from.
    pub fn request(&self) -> &ThemeRequest {
        &self.request
    }

    /// The seed color.
    pub fn source(&self) -> Argb {
        self.request.source
    }

    /// The overrides that were applied.
    pub fn core_colors(&self) -> &CoreColors {
        &self.request.core_colors
    }

    /// Whether overrides were used verbatim.
    pub fn color_match(&self) -> bool {
        self.request.color_match
    }

    /// The six resolved palettes.
    pub fn palettes(&self) -> &CorePalettes {
        &self.palettes
    }

    /// Light scheme.
    pub fn light(&self) -> &Scheme {
        &self.light
    }

    /// Dark scheme.
    pub fn dark(&self) -> &Scheme {
        &self.dark
    }

    /// The scheme for `mode`.
    pub fn scheme(&self, mode: Mode) -> &Scheme {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    /// Extended colors in input order.
    pub fn extended_colors(&self) -> &[ExtendedColorGroup] {
        &self.extended
    }

    /// A builder primed with this theme's inputs.
    pub fn to_builder(&self) -> ThemeBuilder {
        ThemeBuilder::from(self.request.clone())
    }
}
