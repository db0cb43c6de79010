//! Material 3 color themes from a single source color.
//!
//! Colors are converted to HCT (hue, chroma, tone), turned into six tonal
//! palettes, and sampled at fixed tones to produce light and dark schemes.
//! Themes can be exported as CSS custom properties or JSON, saved to a
//! library directory, and seeded from an image.
//!
//! # Example
//!
//! ```
//! use toqan_color::{Argb, Mode, ThemeBuilder, Typography, export};
//!
//! let theme = ThemeBuilder::new(Argb::from_hex("#6750a4")?).build();
//! assert_eq!(theme.scheme(Mode::Light).primary.to_hex(), "#6750a4");
//!
//! let css = export::to_css(&theme, &Typography::default());
//! assert!(css.contains("--md-sys-color-on-primary: #ffffff;"));
//! # Ok::<(), toqan_color::ColorParseError>(())
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

mod color;

pub mod cache;
pub mod contrast;
pub mod core_colors;
pub mod export;
pub mod extract;
pub mod harmonize;
pub mod hct;
pub mod library;
pub mod palette;
pub mod scheme;
pub mod store;
pub mod theme;
pub mod typography;

pub use cache::{cached_theme_count, global_theme, invalidate_theme_cache};
pub use color::{Argb, ColorParseError, Hsl};
pub use core_colors::{CoreColors, CorePalettes, PaletteKey};
pub use extract::{ExtractError, ImageSource, extract_source_color, extract_source_colors};
pub use harmonize::harmonize;
pub use hct::{Hct, hct_to_hex, parse_hct, rgb_to_hct};
pub use palette::TonalPalette;
pub use scheme::{ColorRole, Mode, Scheme};
pub use theme::{ExtendedColor, ExtendedColorGroup, Theme, ThemeBuilder, ThemeRequest};
pub use typography::{TypeScale, TypeStyle, Typography};
