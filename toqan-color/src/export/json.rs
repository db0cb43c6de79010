//! JSON theme documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::{
    Argb,
    core_colors::CoreColors,
    scheme::{Mode, Scheme},
    theme::{ExtendedColor, Theme, ThemeRequest},
    typography::Typography,
};

/// Errors that can occur when importing a theme document.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A required field is absent or has the wrong shape.
    #[error("invalid theme format: missing `{0}`")]
    InvalidThemeFormat(String),
    /// The text is not JSON, or a field holds a value of the wrong type.
    #[error("failed to parse theme JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Role colors for both modes, keyed by camelCase role name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeDocuments {
    /// Light scheme.
    pub light: BTreeMap<String, Argb>,
    /// Dark scheme.
    pub dark: BTreeMap<String, Argb>,
}

/// The exported form of a theme.
///
/// Palettes and schemes are written out in full for consumers that do not
/// generate themes themselves. On import only the inputs are used, and the
/// theme is regenerated from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDocument {
    /// The seed color.
    pub seed: Argb,
    /// Per-role overrides.
    #[serde(default)]
    pub core_colors: CoreColors,
    /// Whether overrides were used verbatim.
    #[serde(default)]
    pub color_match: bool,
    /// Standard tones of each core palette, keyed by palette name then tone.
    pub palettes: BTreeMap<String, BTreeMap<u8, Argb>>,
    /// Role colors for both modes.
    pub schemes: SchemeDocuments,
    /// App-specific colors.
    #[serde(default)]
    pub extended_colors: Vec<ExtendedColor>,
    /// Font choices, when the exporter had any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<Typography>,
}

const REQUIRED_FIELDS: [&str; 5] = [
    "seed",
    "palettes",
    "schemes",
    "schemes.light",
    "schemes.dark",
];

impl ThemeDocument {
    /// Captures `theme` and optional font choices.
    pub fn new(theme: &Theme, typography: Option<&Typography>) -> Self {
        let palettes = theme
            .palettes()
            .iter()
            .map(|(key, palette)| (key.name().to_string(), palette.standard_tones().collect()))
            .collect();
        Self {
            seed: theme.source(),
            core_colors: *theme.core_colors(),
            color_match: theme.color_match(),
            palettes,
            schemes: SchemeDocuments {
                light: scheme_map(theme.scheme(Mode::Light)),
                dark: scheme_map(theme.scheme(Mode::Dark)),
            },
            extended_colors: theme.request().extended_colors.clone(),
            typography: typography.cloned(),
        }
    }

    /// Parses a document, checking that the required fields are present
    /// before decoding them.
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        let value: Value = serde_json::from_str(text)?;
        if let Some(missing) = REQUIRED_FIELDS
            .iter()
            .find(|path| lookup(&value, path).is_none_or(Value::is_null))
        {
            return Err(ImportError::InvalidThemeFormat((*missing).to_string()));
        }
        let document: ThemeDocument = serde_json::from_value(value)?;
        debug!("Imported theme document with seed {}", document.seed);
        Ok(document)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The inputs needed to regenerate the theme.
    pub fn to_request(&self) -> ThemeRequest {
        ThemeRequest {
            source: self.seed,
            core_colors: self.core_colors,
            color_match: self.color_match,
            extended_colors: self.extended_colors.clone(),
        }
    }

    /// Regenerates the theme.
    pub fn to_theme(&self) -> Theme {
        Theme::from_request(self.to_request())
    }
}

fn scheme_map(scheme: &Scheme) -> BTreeMap<String, Argb> {
    scheme
        .roles()
        .map(|(role, color)| (role.name().to_string(), color))
        .collect()
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| current.get(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core_colors::PaletteKey, theme::ThemeBuilder};

    fn sample_theme() -> Theme {
        ThemeBuilder::new(Argb(0xff6750a4))
            .override_color(PaletteKey::Tertiary, Some(Argb(0xff00c853)))
            .color_match(true)
            .extended_color(
                ExtendedColor::new("success", Argb(0xff2e7d32))
                    .with_blend(true)
                    .with_description("Positive outcomes"),
            )
            .build()
    }

    #[test]
    fn test_document_shape() {
        let document = ThemeDocument::new(&sample_theme(), Some(&Typography::default()));
        let json: Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();
        assert_eq!(json["seed"], "#6750a4");
        assert_eq!(json["coreColors"]["tertiary"], "#00c853");
        assert_eq!(json["colorMatch"], true);
        assert_eq!(json["palettes"]["primary"]["40"], "#6750a4");
        assert_eq!(json["palettes"]["neutralVariant"]["100"], "#ffffff");
        assert_eq!(json["schemes"]["dark"]["primary"], "#cfbcff");
        assert_eq!(json["extendedColors"][0]["description"], "Positive outcomes");
        assert_eq!(json["typography"]["bodyFont"], "Roboto");
    }

    #[test]
    fn test_import_regenerates_identical_theme() {
        let theme = sample_theme();
        let text = ThemeDocument::new(&theme, None).to_json().unwrap();
        let document = ThemeDocument::from_json(&text).unwrap();
        assert_eq!(document.to_theme(), theme);
        assert!(document.typography.is_none());
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let text = ThemeDocument::new(&sample_theme(), None).to_json().unwrap();
        let mut value: Value = serde_json::from_str(&text).unwrap();

        value["schemes"].as_object_mut().unwrap().remove("dark");
        let err = ThemeDocument::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(&err, ImportError::InvalidThemeFormat(field) if field == "schemes.dark"));

        value.as_object_mut().unwrap().remove("palettes");
        let err = ThemeDocument::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(&err, ImportError::InvalidThemeFormat(field) if field == "palettes"));

        let err = ThemeDocument::from_json(r#"{"name": "not a theme"}"#).unwrap_err();
        assert!(matches!(&err, ImportError::InvalidThemeFormat(field) if field == "seed"));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            ThemeDocument::from_json("{ not json"),
            Err(ImportError::Json(_))
        ));
        let bad_seed = r#"{"seed":"purple","palettes":{},"schemes":{"light":{},"dark":{}}}"#;
        assert!(matches!(
            ThemeDocument::from_json(bad_seed),
            Err(ImportError::Json(_))
        ));
    }

    #[test]
    fn test_minimal_document_uses_defaults() {
        let minimal = r##"{"seed":"#0b57d0","palettes":{},"schemes":{"light":{},"dark":{}}}"##;
        let document = ThemeDocument::from_json(minimal).unwrap();
        assert!(document.core_colors.is_empty());
        assert!(!document.color_match);
        assert_eq!(document.to_theme(), Theme::from_source(Argb(0xff0b57d0)));
    }
}
