//! Light and dark color schemes.
//!
//! A scheme is a fixed lookup: every role samples one of the six core
//! palettes at a tone that depends only on the mode. The role table below is
//! the single source of truth for role names, palettes and tones.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Argb,
    core_colors::{CorePalettes, PaletteKey},
};

/// Light or dark.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Dark content on light surfaces.
    #[default]
    Light,
    /// Light content on dark surfaces.
    Dark,
}

impl Mode {
    /// Both modes, light first.
    pub const ALL: [Mode; 2] = [Mode::Light, Mode::Dark];

    /// `"light"` or `"dark"`.
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }

    /// Whether this is [`Mode::Dark`].
    pub const fn is_dark(self) -> bool {
        matches!(self, Mode::Dark)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! color_roles {
    ($(
        $(#[doc = $doc:literal])*
        $field:ident, $variant:ident, $camel:literal, $kebab:literal,
        $palette:ident, $light:literal, $dark:literal;
    )*) => {
        /// A named slot in a [`Scheme`].
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ColorRole {
            $(
                $(#[doc = $doc])*
                $variant,
            )*
        }

        impl ColorRole {
            /// Every role in table order.
            pub const ALL: &'static [ColorRole] = &[$(ColorRole::$variant),*];

            /// camelCase name, as used in JSON.
            pub const fn name(self) -> &'static str {
                match self {
                    $(ColorRole::$variant => $camel,)*
                }
            }

            /// kebab-case name, as used in `--md-sys-color-*` properties.
            pub const fn css_name(self) -> &'static str {
                match self {
                    $(ColorRole::$variant => $kebab,)*
                }
            }

            /// The palette this role samples from.
            pub const fn palette(self) -> PaletteKey {
                match self {
                    $(ColorRole::$variant => PaletteKey::$palette,)*
                }
            }

            /// The tone this role takes in `mode`.
            pub const fn tone(self, mode: Mode) -> u8 {
                match (self, mode) {
                    $(
                        (ColorRole::$variant, Mode::Light) => $light,
                        (ColorRole::$variant, Mode::Dark) => $dark,
                    )*
                }
            }
        }

        /// Every role of one mode, resolved to a color.
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct Scheme {
            /// The mode the tones were taken for.
            pub mode: Mode,
            $(
                $(#[doc = $doc])*
                pub $field: Argb,
            )*
        }

        impl Scheme {
            /// Samples `palettes` at the tones of `mode`.
            pub fn from_palettes(palettes: &CorePalettes, mode: Mode) -> Self {
                Self {
                    mode,
                    $(
                        $field: palettes
                            .get(PaletteKey::$palette)
                            .tone(f64::from(ColorRole::$variant.tone(mode))),
                    )*
                }
            }

            /// The color assigned to `role`.
            pub fn get(&self, role: ColorRole) -> Argb {
                match role {
                    $(ColorRole::$variant => self.$field,)*
                }
            }
        }
    };
}

color_roles! {
    /// Main accent.
    primary, Primary, "primary", "primary", Primary, 40, 80;
    /// Content on `primary`.
    on_primary, OnPrimary, "onPrimary", "on-primary", Primary, 100, 20;
    /// Tonal container for `primary`.
    primary_container, PrimaryContainer, "primaryContainer", "primary-container", Primary, 90, 30;
    /// Content on `primary_container`.
    on_primary_container, OnPrimaryContainer, "onPrimaryContainer", "on-primary-container", Primary, 10, 90;
    /// Secondary accent.
    secondary, Secondary, "secondary", "secondary", Secondary, 40, 80;
    /// Content on `secondary`.
    on_secondary, OnSecondary, "onSecondary", "on-secondary", Secondary, 100, 20;
    /// Tonal container for `secondary`.
    secondary_container, SecondaryContainer, "secondaryContainer", "secondary-container", Secondary, 90, 30;
    /// Content on `secondary_container`.
    on_secondary_container, OnSecondaryContainer, "onSecondaryContainer", "on-secondary-container", Secondary, 10, 90;
    /// Tertiary accent.
    tertiary, Tertiary, "tertiary", "tertiary", Tertiary, 40, 80;
    /// Content on `tertiary`.
    on_tertiary, OnTertiary, "onTertiary", "on-tertiary", Tertiary, 100, 20;
    /// Tonal container for `tertiary`.
    tertiary_container, TertiaryContainer, "tertiaryContainer", "tertiary-container", Tertiary, 90, 30;
    /// Content on `tertiary_container`.
    on_tertiary_container, OnTertiaryContainer, "onTertiaryContainer", "on-tertiary-container", Tertiary, 10, 90;
    /// Error accent.
    error, Error, "error", "error", Error, 40, 80;
    /// Content on `error`.
    on_error, OnError, "onError", "on-error", Error, 100, 20;
    /// Tonal container for `error`.
    error_container, ErrorContainer, "errorContainer", "error-container", Error, 90, 30;
    /// Content on `error_container`. Tone 80 in dark mode.
    on_error_container, OnErrorContainer, "onErrorContainer", "on-error-container", Error, 10, 80;
    /// App background.
    background, Background, "background", "background", Neutral, 99, 10;
    /// Content on `background`.
    on_background, OnBackground, "onBackground", "on-background", Neutral, 10, 90;
    /// Default surface.
    surface, Surface, "surface", "surface", Neutral, 99, 10;
    /// Content on `surface`.
    on_surface, OnSurface, "onSurface", "on-surface", Neutral, 10, 90;
    /// Medium-emphasis surface.
    surface_variant, SurfaceVariant, "surfaceVariant", "surface-variant", NeutralVariant, 90, 30;
    /// Content on `surface_variant`.
    on_surface_variant, OnSurfaceVariant, "onSurfaceVariant", "on-surface-variant", NeutralVariant, 30, 80;
    /// Borders and dividers.
    outline, Outline, "outline", "outline", NeutralVariant, 50, 60;
    /// Low-emphasis borders.
    outline_variant, OutlineVariant, "outlineVariant", "outline-variant", NeutralVariant, 80, 30;
    /// Elevation shadows.
    shadow, Shadow, "shadow", "shadow", Neutral, 0, 0;
    /// Modal scrims.
    scrim, Scrim, "scrim", "scrim", Neutral, 0, 0;
    /// Surface with the opposite mode's tone.
    inverse_surface, InverseSurface, "inverseSurface", "inverse-surface", Neutral, 20, 90;
    /// Content on `inverse_surface`.
    inverse_on_surface, InverseOnSurface, "inverseOnSurface", "inverse-on-surface", Neutral, 95, 20;
    /// Accent for use on `inverse_surface`.
    inverse_primary, InversePrimary, "inversePrimary", "inverse-primary", Primary, 80, 40;
    /// Tint overlay for elevated surfaces.
    surface_tint, SurfaceTint, "surfaceTint", "surface-tint", Primary, 40, 80;
    /// Lowest-emphasis container.
    surface_container_lowest, SurfaceContainerLowest, "surfaceContainerLowest", "surface-container-lowest", Neutral, 100, 4;
    /// Low-emphasis container.
    surface_container_low, SurfaceContainerLow, "surfaceContainerLow", "surface-container-low", Neutral, 96, 10;
    /// Default container.
    surface_container, SurfaceContainer, "surfaceContainer", "surface-container", Neutral, 94, 12;
    /// High-emphasis container.
    surface_container_high, SurfaceContainerHigh, "surfaceContainerHigh", "surface-container-high", Neutral, 92, 17;
    /// Highest-emphasis container.
    surface_container_highest, SurfaceContainerHighest, "surfaceContainerHighest", "surface-container-highest", Neutral, 90, 22;
    /// Dimmest surface.
    surface_dim, SurfaceDim, "surfaceDim", "surface-dim", Neutral, 87, 6;
    /// Brightest surface.
    surface_bright, SurfaceBright, "surfaceBright", "surface-bright", Neutral, 98, 24;
    /// Primary accent that keeps its tone across modes.
    primary_fixed, PrimaryFixed, "primaryFixed", "primary-fixed", Primary, 90, 90;
    /// Dimmer `primary_fixed`.
    primary_fixed_dim, PrimaryFixedDim, "primaryFixedDim", "primary-fixed-dim", Primary, 80, 80;
    /// Content on `primary_fixed`.
    on_primary_fixed, OnPrimaryFixed, "onPrimaryFixed", "on-primary-fixed", Primary, 10, 10;
    /// Lower-emphasis content on `primary_fixed`.
    on_primary_fixed_variant, OnPrimaryFixedVariant, "onPrimaryFixedVariant", "on-primary-fixed-variant", Primary, 30, 30;
    /// Secondary accent that keeps its tone across modes.
    secondary_fixed, SecondaryFixed, "secondaryFixed", "secondary-fixed", Secondary, 90, 90;
    /// Dimmer `secondary_fixed`.
    secondary_fixed_dim, SecondaryFixedDim, "secondaryFixedDim", "secondary-fixed-dim", Secondary, 80, 80;
    /// Content on `secondary_fixed`.
    on_secondary_fixed, OnSecondaryFixed, "onSecondaryFixed", "on-secondary-fixed", Secondary, 10, 10;
    /// Lower-emphasis content on `secondary_fixed`.
    on_secondary_fixed_variant, OnSecondaryFixedVariant, "onSecondaryFixedVariant", "on-secondary-fixed-variant", Secondary, 30, 30;
    /// Tertiary accent that keeps its tone across modes.
    tertiary_fixed, TertiaryFixed, "tertiaryFixed", "tertiary-fixed", Tertiary, 90, 90;
    /// Dimmer `tertiary_fixed`.
    tertiary_fixed_dim, TertiaryFixedDim, "tertiaryFixedDim", "tertiary-fixed-dim", Tertiary, 80, 80;
    /// Content on `tertiary_fixed`.
    on_tertiary_fixed, OnTertiaryFixed, "onTertiaryFixed", "on-tertiary-fixed", Tertiary, 10, 10;
    /// Lower-emphasis content on `tertiary_fixed`.
    on_tertiary_fixed_variant, OnTertiaryFixedVariant, "onTertiaryFixedVariant", "on-tertiary-fixed-variant", Tertiary, 30, 30;
}

impl ColorRole {
    /// Looks a role up by its camelCase or kebab-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.name() == name || role.css_name() == name)
    }

    /// The role meant for text and icons drawn on this role, if any.
    pub const fn content_role(self) -> Option<ColorRole> {
        use ColorRole::*;
        Some(match self {
            Primary => OnPrimary,
            PrimaryContainer => OnPrimaryContainer,
            Secondary => OnSecondary,
            SecondaryContainer => OnSecondaryContainer,
            Tertiary => OnTertiary,
            TertiaryContainer => OnTertiaryContainer,
            Error => OnError,
            ErrorContainer => OnErrorContainer,
            Background => OnBackground,
            Surface | SurfaceContainerLowest | SurfaceContainerLow | SurfaceContainer
            | SurfaceContainerHigh | SurfaceContainerHighest | SurfaceDim | SurfaceBright => {
                OnSurface
            }
            SurfaceVariant => OnSurfaceVariant,
            InverseSurface => InverseOnSurface,
            PrimaryFixed | PrimaryFixedDim => OnPrimaryFixed,
            SecondaryFixed | SecondaryFixedDim => OnSecondaryFixed,
            TertiaryFixed | TertiaryFixedDim => OnTertiaryFixed,
            _ => return None,
        })
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Scheme {
    /// Light scheme over `palettes`.
    pub fn light(palettes: &CorePalettes) -> Self {
        Self::from_palettes(palettes, Mode::Light)
    }

    /// Dark scheme over `palettes`.
    pub fn dark(palettes: &CorePalettes) -> Self {
        Self::from_palettes(palettes, Mode::Dark)
    }

    /// `(role, color)` pairs in table order.
    pub fn roles(&self) -> impl Iterator<Item = (ColorRole, Argb)> + '_ {
        ColorRole::ALL.iter().map(move |&role| (role, self.get(role)))
    }

    /// The content color matching a background taken from this scheme.
    ///
    /// Returns `None` when `background` is not one of the scheme's
    /// background roles.
    pub fn content_color_for(&self, background: Argb) -> Option<Argb> {
        self.roles()
            .filter(|&(_, color)| color == background)
            .find_map(|(role, _)| role.content_role())
            .map(|content| self.get(content))
    }
}
